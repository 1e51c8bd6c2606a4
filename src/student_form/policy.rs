use crate::session::Role;

use super::fields::FormField;
use super::FormStep;

/// Whether `role` may change `field`. Parents only read, faculty maintain the
/// academic record, students and admins edit everything.
pub fn editable(role: Role, field: FormField) -> bool {
    match role {
        Role::Parent => false,
        Role::Faculty => field.step() == FormStep::Academic,
        Role::Student | Role::Admin => true,
    }
}

/// True when `role` can edit at least one field on `step`.
pub fn step_editable(role: Role, step: FormStep) -> bool {
    FormField::in_step(step).any(|f| editable(role, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_reads_only() {
        assert!(FormField::ALL.iter().all(|f| !editable(Role::Parent, *f)));
        assert!(!step_editable(Role::Parent, FormStep::Academic));
    }

    #[test]
    fn faculty_edits_academic_step_only() {
        assert!(editable(Role::Faculty, FormField::CurrentCgpa));
        assert!(editable(Role::Faculty, FormField::AttendancePercentage));
        assert!(!editable(Role::Faculty, FormField::StudentEmail));
        assert!(!editable(Role::Faculty, FormField::AcademicRiskScore));
        assert!(step_editable(Role::Faculty, FormStep::Academic));
        assert!(!step_editable(Role::Faculty, FormStep::Personal));
        assert!(!step_editable(Role::Faculty, FormStep::Additional));
    }

    #[test]
    fn student_and_admin_edit_everything() {
        for role in [Role::Student, Role::Admin] {
            assert!(FormField::ALL.iter().all(|f| editable(role, *f)));
        }
    }
}
