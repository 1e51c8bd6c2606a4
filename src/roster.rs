//! Student rosters shown on the admin, faculty and dropout dashboards, and
//! the records the faculty form is opened with.

use crate::session::Role;
use crate::student_form::StudentDraft;

/// A student table with a search box over some of its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roster {
    pub caption: &'static str,
    pub columns: &'static [&'static str],
    pub rows: &'static [&'static [&'static str]],
    /// Columns the search box matches against.
    pub searchable: &'static [&'static str],
}

impl Roster {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    /// Case-insensitive substring match over the searchable columns. An
    /// empty query matches every row.
    pub fn matches(&self, row: &[&str], query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.searchable
            .iter()
            .filter_map(|name| self.column(name))
            .filter_map(|idx| row.get(idx))
            .any(|cell| cell.to_lowercase().contains(&query))
    }

    pub fn filter(&self, query: &str) -> Vec<&'static [&'static str]> {
        self.rows
            .iter()
            .copied()
            .filter(|row| self.matches(row, query))
            .collect()
    }
}

pub const ADMIN_STUDENTS: Roster = Roster {
    caption: "Students",
    columns: &["ID", "Name", "Program", "Semester", "Attendance", "Status"],
    rows: &[
        &["UPES2024001", "John Doe", "B.Tech CSE", "6th", "85%", "Active"],
        &["UPES2024002", "Jane Smith", "B.Tech ME", "4th", "92%", "Active"],
        &["UPES2024003", "Mike Johnson", "B.Tech EE", "8th", "78%", "Warning"],
        &["UPES2024004", "Sarah Wilson", "B.Tech CSE", "2nd", "95%", "Active"],
    ],
    searchable: &["Name", "ID"],
};

pub const FACULTY_STUDENTS: Roster = Roster {
    caption: "Students in my batches",
    columns: &["ID", "Name", "Batch", "Semester", "Attendance", "CGPA", "Performance"],
    rows: &[
        &["UPES2022001", "John Doe", "B.Tech CSE 2022", "6th", "85%", "8.2", "Good"],
        &["UPES2022002", "Jane Smith", "B.Tech CSE 2022", "6th", "92%", "8.8", "Excellent"],
        &["UPES2023001", "Mike Johnson", "B.Tech CSE 2023", "4th", "78%", "7.5", "Average"],
        &["UPES2023002", "Sarah Wilson", "B.Tech CSE 2023", "4th", "95%", "9.1", "Excellent"],
    ],
    searchable: &["Name", "ID", "Batch"],
};

pub const AT_RISK_STUDENTS: Roster = Roster {
    caption: "At-risk students",
    columns: &["ID", "Name", "Program", "Risk score", "Risk level"],
    rows: &[
        &["UPES2023045", "Alex Kumar", "B.Tech CSE", "85", "High"],
        &["UPES2022087", "Priya Sharma", "B.Tech ME", "72", "High"],
        &["UPES2024012", "Rahul Singh", "B.Tech EE", "58", "Medium"],
        &["UPES2023098", "Neha Patel", "B.Tech CSE", "41", "Low"],
    ],
    searchable: &["Name", "ID", "Program"],
};

/// Contact details the faculty roster does not show.
struct Contact {
    id: &'static str,
    date_of_birth: &'static str,
    gender: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
}

const FACULTY_CONTACTS: &[Contact] = &[
    Contact {
        id: "UPES2022001",
        date_of_birth: "2003-04-12",
        gender: "male",
        email: "john.doe@upes.ac.in",
        phone: "+91 9876543210",
        address: "Bidholi, Dehradun",
    },
    Contact {
        id: "UPES2022002",
        date_of_birth: "2003-09-30",
        gender: "female",
        email: "jane.smith@upes.ac.in",
        phone: "+91 9876543211",
        address: "Prem Nagar, Dehradun",
    },
    Contact {
        id: "UPES2023001",
        date_of_birth: "2004-01-18",
        gender: "male",
        email: "mike.johnson@upes.ac.in",
        phone: "+91 9876543212",
        address: "Kandoli, Dehradun",
    },
    Contact {
        id: "UPES2023002",
        date_of_birth: "2004-06-05",
        gender: "female",
        email: "sarah.wilson@upes.ac.in",
        phone: "+91 9876543213",
        address: "Clement Town, Dehradun",
    },
];

/// Ids of the students a faculty member can open in the form.
pub fn faculty_student_ids() -> impl Iterator<Item = &'static str> {
    FACULTY_STUDENTS.rows.iter().map(|row| row[0])
}

/// The full record of a faculty roster student, ready to seed the form.
pub fn faculty_record(id: &str) -> Option<StudentDraft> {
    let id = id.trim();
    let row = FACULTY_STUDENTS
        .rows
        .iter()
        .find(|row| row[0].eq_ignore_ascii_case(id))?;
    let contact = FACULTY_CONTACTS.iter().find(|c| c.id == row[0])?;

    let mut draft = StudentDraft::default();
    let personal = &mut draft.personal;
    personal.student_id = row[0].to_string();
    personal.full_name = row[1].to_string();
    personal.date_of_birth = contact.date_of_birth.to_string();
    personal.gender = contact.gender.to_string();
    personal.student_email = contact.email.to_string();
    personal.phone_number = contact.phone.to_string();
    personal.address = contact.address.to_string();

    let academic = &mut draft.academic;
    academic.batch = row[2].to_string();
    academic.semester = row[3].trim_end_matches(char::is_alphabetic).to_string();
    academic.department = "Computer Science & Engineering".to_string();
    academic.attendance_percentage = row[4].trim_end_matches('%').to_string();
    academic.current_cgpa = row[5].to_string();
    Some(draft)
}

/// Draft the form opens with. Faculty only edit academic fields, so they
/// start on the first student of their roster instead of a blank record.
pub fn opening_draft(role: Role) -> StudentDraft {
    match role {
        Role::Faculty => faculty_student_ids()
            .next()
            .and_then(faculty_record)
            .unwrap_or_default(),
        Role::Student | Role::Parent | Role::Admin => StudentDraft::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student_form::validation::missing_required;

    #[test]
    fn empty_query_keeps_every_row() {
        for roster in [ADMIN_STUDENTS, FACULTY_STUDENTS, AT_RISK_STUDENTS] {
            assert_eq!(roster.filter("").len(), roster.rows.len());
            assert_eq!(roster.filter("   ").len(), roster.rows.len());
        }
    }

    #[test]
    fn admin_search_covers_name_and_id() {
        assert_eq!(ADMIN_STUDENTS.filter("jane")[0][1], "Jane Smith");
        assert_eq!(ADMIN_STUDENTS.filter("upes2024003")[0][1], "Mike Johnson");
        // program is shown but not searched
        assert!(ADMIN_STUDENTS.filter("B.Tech ME").is_empty());
    }

    #[test]
    fn faculty_search_covers_batch() {
        let found = FACULTY_STUDENTS.filter("cse 2023");
        let names: Vec<&str> = found.iter().map(|row| row[1]).collect();
        assert_eq!(names, ["Mike Johnson", "Sarah Wilson"]);
        assert_eq!(FACULTY_STUDENTS.filter("WILSON").len(), 1);
        assert!(FACULTY_STUDENTS.filter("Excellent").is_empty());
    }

    #[test]
    fn at_risk_search_covers_program() {
        assert_eq!(AT_RISK_STUDENTS.filter("b.tech cse").len(), 2);
        assert_eq!(AT_RISK_STUDENTS.filter("2022087")[0][1], "Priya Sharma");
        assert!(AT_RISK_STUDENTS.filter("High").is_empty());
    }

    #[test]
    fn faculty_records_fill_the_required_fields() {
        for id in faculty_student_ids() {
            let draft = faculty_record(id).unwrap();
            assert!(missing_required(&draft).is_empty(), "{id}");
        }
        let draft = faculty_record("upes2023001").unwrap();
        assert_eq!(draft.personal.full_name, "Mike Johnson");
        assert_eq!(draft.academic.semester, "4");
        assert_eq!(draft.academic.attendance_percentage, "78");
        assert_eq!(draft.academic.current_cgpa, "7.5");
        assert!(faculty_record("UPES2024001").is_none());
    }

    #[test]
    fn only_faculty_open_on_a_record() {
        assert_eq!(opening_draft(Role::Faculty).personal.student_id, "UPES2022001");
        assert_eq!(opening_draft(Role::Student), StudentDraft::default());
        assert_eq!(opening_draft(Role::Parent), StudentDraft::default());
    }
}
