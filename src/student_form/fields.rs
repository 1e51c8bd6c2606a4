use serde::{Deserialize, Serialize};

use super::FormStep;

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Number,
    Multiline,
    Select(&'static [(&'static str, &'static str)]),
}

pub const GENDER_OPTIONS: &[(&str, &str)] = &[
    ("male", "Male"),
    ("female", "Female"),
    ("other", "Other"),
    ("prefer-not-to-say", "Prefer not to say"),
];

pub const CATEGORY_OPTIONS: &[(&str, &str)] = &[
    ("general", "General"),
    ("obc", "OBC"),
    ("sc", "SC"),
    ("st", "ST"),
    ("ews", "EWS"),
];

pub const SEMESTER_OPTIONS: &[(&str, &str)] = &[
    ("1", "1st Semester"),
    ("2", "2nd Semester"),
    ("3", "3rd Semester"),
    ("4", "4th Semester"),
    ("5", "5th Semester"),
    ("6", "6th Semester"),
    ("7", "7th Semester"),
    ("8", "8th Semester"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub student_id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub student_email: String,
    pub phone_number: String,
    pub address: String,
    pub father_name: String,
    pub mother_name: String,
    pub guardian_name: String,
    pub guardian_phone_number: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub nationality: String,
    pub religion: String,
    pub caste: String,
    pub category: String,
    pub aadhar_number: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            student_id: String::new(),
            full_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            student_email: String::new(),
            phone_number: String::new(),
            address: String::new(),
            father_name: String::new(),
            mother_name: String::new(),
            guardian_name: String::new(),
            guardian_phone_number: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_number: String::new(),
            nationality: "Indian".to_string(),
            religion: String::new(),
            caste: String::new(),
            category: String::new(),
            aadhar_number: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicInfo {
    #[serde(rename = "currentCGPA")]
    pub current_cgpa: String,
    #[serde(rename = "previousSemesterCGPA")]
    pub previous_semester_cgpa: String,
    pub semester: String,
    pub batch: String,
    pub department: String,
    pub internal_assessment_marks: String,
    pub mid_sem_results: String,
    pub backlogs: String,
    pub attendance_percentage: String,
    pub subject_wise_attendance: String,
}

impl Default for AcademicInfo {
    fn default() -> Self {
        Self {
            current_cgpa: String::new(),
            previous_semester_cgpa: String::new(),
            semester: String::new(),
            batch: String::new(),
            department: String::new(),
            internal_assessment_marks: String::new(),
            mid_sem_results: String::new(),
            backlogs: "0".to_string(),
            attendance_percentage: String::new(),
            subject_wise_attendance: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    pub extracurricular_participation: String,
    pub academic_risk_score: String,
    pub financial_risk_score: String,
    pub psychological_risk_score: String,
    pub disciplinary_actions: String,
}

/// The not-yet-submitted student profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub personal: PersonalInfo,
    pub academic: AcademicInfo,
    pub additional: AdditionalInfo,
}

macro_rules! form_fields {
    ($($variant:ident => $group:ident . $slot:ident, $key:literal, $label:literal, $kind:expr;)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FormField {
            $($variant,)+
        }

        impl FormField {
            pub const ALL: &'static [FormField] = &[$(FormField::$variant,)+];

            /// Wire name of the field, as used in exported drafts.
            pub fn key(self) -> &'static str {
                match self {
                    $(FormField::$variant => $key,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(FormField::$variant => $label,)+
                }
            }

            pub fn kind(self) -> FieldKind {
                match self {
                    $(FormField::$variant => $kind,)+
                }
            }

            pub fn step(self) -> FormStep {
                match self {
                    $(FormField::$variant => form_fields!(@step $group),)+
                }
            }
        }

        impl StudentDraft {
            pub fn get(&self, field: FormField) -> &str {
                match field {
                    $(FormField::$variant => self.$group.$slot.as_str(),)+
                }
            }

            pub fn set(&mut self, field: FormField, value: String) {
                match field {
                    $(FormField::$variant => self.$group.$slot = value,)+
                }
            }
        }
    };
    (@step personal) => { FormStep::Personal };
    (@step academic) => { FormStep::Academic };
    (@step additional) => { FormStep::Additional };
}

form_fields! {
    StudentId => personal.student_id, "studentId", "Student ID", FieldKind::Text;
    FullName => personal.full_name, "fullName", "Full Name", FieldKind::Text;
    DateOfBirth => personal.date_of_birth, "dateOfBirth", "Date of Birth", FieldKind::Date;
    Gender => personal.gender, "gender", "Gender", FieldKind::Select(GENDER_OPTIONS);
    StudentEmail => personal.student_email, "studentEmail", "Email Address", FieldKind::Text;
    PhoneNumber => personal.phone_number, "phoneNumber", "Phone Number", FieldKind::Text;
    Address => personal.address, "address", "Complete Address", FieldKind::Multiline;
    FatherName => personal.father_name, "fatherName", "Father's Name", FieldKind::Text;
    MotherName => personal.mother_name, "motherName", "Mother's Name", FieldKind::Text;
    GuardianName => personal.guardian_name, "guardianName", "Guardian's Name", FieldKind::Text;
    GuardianPhoneNumber => personal.guardian_phone_number, "guardianPhoneNumber", "Guardian's Phone", FieldKind::Text;
    EmergencyContactName => personal.emergency_contact_name, "emergencyContactName", "Emergency Contact Name", FieldKind::Text;
    EmergencyContactNumber => personal.emergency_contact_number, "emergencyContactNumber", "Emergency Contact", FieldKind::Text;
    Nationality => personal.nationality, "nationality", "Nationality", FieldKind::Text;
    Religion => personal.religion, "religion", "Religion", FieldKind::Text;
    Caste => personal.caste, "caste", "Caste", FieldKind::Text;
    Category => personal.category, "category", "Category", FieldKind::Select(CATEGORY_OPTIONS);
    AadharNumber => personal.aadhar_number, "aadharNumber", "Aadhar Number", FieldKind::Text;
    CurrentCgpa => academic.current_cgpa, "currentCGPA", "Current CGPA", FieldKind::Number;
    PreviousSemesterCgpa => academic.previous_semester_cgpa, "previousSemesterCGPA", "Previous Semester CGPA", FieldKind::Number;
    Semester => academic.semester, "semester", "Current Semester", FieldKind::Select(SEMESTER_OPTIONS);
    Batch => academic.batch, "batch", "Batch", FieldKind::Text;
    Department => academic.department, "department", "Department", FieldKind::Text;
    InternalAssessmentMarks => academic.internal_assessment_marks, "internalAssessmentMarks", "Internal Assessment Marks (Details)", FieldKind::Multiline;
    MidSemResults => academic.mid_sem_results, "midSemResults", "Mid-Semester Results (Details)", FieldKind::Multiline;
    Backlogs => academic.backlogs, "backlogs", "Number of Backlogs", FieldKind::Number;
    AttendancePercentage => academic.attendance_percentage, "attendancePercentage", "Attendance %", FieldKind::Number;
    SubjectWiseAttendance => academic.subject_wise_attendance, "subjectWiseAttendance", "Subject-wise Attendance (Details)", FieldKind::Multiline;
    ExtracurricularParticipation => additional.extracurricular_participation, "extracurricularParticipation", "Extracurricular Participation", FieldKind::Multiline;
    AcademicRiskScore => additional.academic_risk_score, "academicRiskScore", "Academic Risk Score", FieldKind::Number;
    FinancialRiskScore => additional.financial_risk_score, "financialRiskScore", "Financial Risk Score", FieldKind::Number;
    PsychologicalRiskScore => additional.psychological_risk_score, "psychologicalRiskScore", "Psychological Risk Score", FieldKind::Number;
    DisciplinaryActions => additional.disciplinary_actions, "disciplinaryActions", "Disciplinary Actions", FieldKind::Multiline;
}

impl FormField {
    /// Must be filled in before leaving the personal step.
    pub const REQUIRED: [FormField; 7] = [
        FormField::StudentId,
        FormField::FullName,
        FormField::DateOfBirth,
        FormField::Gender,
        FormField::StudentEmail,
        FormField::PhoneNumber,
        FormField::Address,
    ];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn in_step(step: FormStep) -> impl Iterator<Item = FormField> {
        Self::ALL.iter().copied().filter(move |f| f.step() == step)
    }

    /// Accepts the wire key (`studentEmail`) or a snake/kebab spelling
    /// (`student_email`, `student-email`), ignoring case.
    pub fn from_key(key: &str) -> Option<FormField> {
        let wanted: String = key
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_has_fields_and_all_are_covered() {
        let personal = FormField::in_step(FormStep::Personal).count();
        let academic = FormField::in_step(FormStep::Academic).count();
        let additional = FormField::in_step(FormStep::Additional).count();
        assert_eq!(personal, 18);
        assert_eq!(academic, 10);
        assert_eq!(additional, 5);
        assert_eq!(personal + academic + additional, FormField::ALL.len());
    }

    #[test]
    fn required_fields_are_personal() {
        assert!(FormField::REQUIRED
            .iter()
            .all(|f| f.step() == FormStep::Personal));
        assert!(!FormField::Nationality.is_required());
    }

    #[test]
    fn defaults_match_blank_form() {
        let draft = StudentDraft::default();
        assert_eq!(draft.get(FormField::Nationality), "Indian");
        assert_eq!(draft.get(FormField::Backlogs), "0");
        assert_eq!(draft.get(FormField::StudentEmail), "");
    }

    #[test]
    fn get_and_set_address_the_same_slot() {
        let mut draft = StudentDraft::default();
        for (i, field) in FormField::ALL.iter().enumerate() {
            draft.set(*field, format!("value-{i}"));
        }
        for (i, field) in FormField::ALL.iter().enumerate() {
            assert_eq!(draft.get(*field), format!("value-{i}"));
        }
        assert_eq!(draft.academic.current_cgpa, format!("value-{}", 18));
    }

    #[test]
    fn keys_resolve_in_several_spellings() {
        assert_eq!(FormField::from_key("studentEmail"), Some(FormField::StudentEmail));
        assert_eq!(FormField::from_key("student_email"), Some(FormField::StudentEmail));
        assert_eq!(FormField::from_key("CURRENT-CGPA"), Some(FormField::CurrentCgpa));
        assert_eq!(FormField::from_key("shoeSize"), None);
    }

    #[test]
    fn draft_serializes_with_wire_keys() {
        let json = serde_json::to_value(StudentDraft::default()).unwrap();
        assert_eq!(json["personal"]["nationality"], "Indian");
        assert_eq!(json["academic"]["currentCGPA"], "");
        assert!(json["additional"]["academicRiskScore"].is_string());
    }
}
