//! The three-step student information form.
//!
//! [`StudentForm`] owns the draft, the current step and the inline error
//! messages. It validates but never checks who is typing: front ends ask
//! [`policy::editable`] before offering a field for input.

pub mod fields;
pub mod policy;
pub mod validation;

use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, info};

use crate::error::FormError;

pub use fields::{FieldKind, FormField, StudentDraft};
pub use policy::editable;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_secs(2);
pub const SAVED_MESSAGE: &str = "Student information saved successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormStep {
    Personal,
    Academic,
    Additional,
}

impl FormStep {
    pub const ALL: [FormStep; 3] = [FormStep::Personal, FormStep::Academic, FormStep::Additional];

    pub fn index(self) -> usize {
        match self {
            FormStep::Personal => 0,
            FormStep::Academic => 1,
            FormStep::Additional => 2,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            FormStep::Personal => "personal",
            FormStep::Academic => "academic",
            FormStep::Additional => "additional",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::Personal => "Personal Information",
            FormStep::Academic => "Academic Records",
            FormStep::Additional => "Additional Information",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FormStep::Personal => "Basic details and contact information",
            FormStep::Academic => "Performance and attendance data",
            FormStep::Additional => "Risk assessment and activities",
        }
    }

    fn next(self) -> FormStep {
        match self {
            FormStep::Personal => FormStep::Academic,
            FormStep::Academic | FormStep::Additional => FormStep::Additional,
        }
    }

    fn prev(self) -> FormStep {
        match self {
            FormStep::Personal | FormStep::Academic => FormStep::Personal,
            FormStep::Additional => FormStep::Academic,
        }
    }

    pub fn is_last(self) -> bool {
        self == FormStep::Additional
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub student_id: String,
    pub message: &'static str,
}

/// A submission in flight. Holds a copy of the draft so the wait can run
/// on another task while the form stays borrowed by the UI.
#[derive(Debug)]
pub struct SubmissionTicket {
    snapshot: StudentDraft,
    delay: Duration,
}

impl SubmissionTicket {
    pub fn draft(&self) -> &StudentDraft {
        &self.snapshot
    }

    /// Simulated save: waits out the delay and always succeeds.
    pub async fn wait(self) -> SubmitOutcome {
        tokio::time::sleep(self.delay).await;
        match serde_json::to_string(&self.snapshot) {
            Ok(json) => debug!("[form] Submitted draft: {json}"),
            Err(e) => debug!("[form] Submitted draft (not serializable: {e})"),
        }
        SubmitOutcome {
            student_id: self.snapshot.personal.student_id,
            message: SAVED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudentForm {
    step: FormStep,
    draft: StudentDraft,
    errors: BTreeMap<FormField, &'static str>,
    submitting: bool,
    submit_delay: Duration,
    last_outcome: Option<SubmitOutcome>,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentForm {
    pub fn new() -> Self {
        Self::with_initial(StudentDraft::default())
    }

    /// Starts the form prefilled, e.g. from an existing student record.
    pub fn with_initial(draft: StudentDraft) -> Self {
        Self {
            step: FormStep::Personal,
            draft,
            errors: BTreeMap::new(),
            submitting: false,
            submit_delay: DEFAULT_SUBMIT_DELAY,
            last_outcome: None,
        }
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    /// `(current, total)` for a "Step x of y" counter.
    pub fn progress(&self) -> (usize, usize) {
        (self.step.index() + 1, FormStep::ALL.len())
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn value(&self, field: FormField) -> &str {
        self.draft.get(field)
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &BTreeMap<FormField, &'static str> {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.errors.remove(&field);
        if let Some(message) = validation::validate_field(field, &value) {
            self.errors.insert(field, message);
        }
        self.draft.set(field, value);
    }

    /// Moves to the next step. Leaving the personal step needs every required
    /// field; the other steps pass through. The error map is replaced with the
    /// outcome of the step check either way.
    pub fn advance(&mut self) -> bool {
        let missing = if self.step == FormStep::Personal {
            validation::missing_required(&self.draft)
        } else {
            Vec::new()
        };

        self.errors = missing
            .iter()
            .map(|f| (*f, validation::REQUIRED))
            .collect();

        if !missing.is_empty() {
            debug!("[form] Step {} blocked: {} missing", self.step.id(), missing.len());
            return false;
        }

        self.step = self.step.next();
        true
    }

    /// Replaces the draft with an existing record and starts again from the
    /// first step. The last save message is kept.
    pub fn load(&mut self, draft: StudentDraft) {
        debug!("[form] Loaded record {:?}", draft.personal.student_id);
        self.draft = draft;
        self.errors.clear();
        self.step = FormStep::Personal;
    }

    pub fn retreat(&mut self) {
        self.step = self.step.prev();
    }

    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, FormError> {
        if !self.step.is_last() {
            return Err(FormError::NotOnFinalStep);
        }
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.submitting = true;
        self.last_outcome = None;
        info!(
            "[form] Saving student information for {:?}",
            self.draft.personal.student_id
        );
        Ok(SubmissionTicket {
            snapshot: self.draft.clone(),
            delay: self.submit_delay,
        })
    }

    /// Records a finished save and starts over with a blank draft.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) -> Result<&SubmitOutcome, FormError> {
        if !self.submitting {
            return Err(FormError::NotSubmitting);
        }
        info!("[form] {} ({})", outcome.message, outcome.student_id);
        self.submitting = false;
        self.draft = StudentDraft::default();
        self.errors.clear();
        self.step = FormStep::Personal;
        Ok(&*self.last_outcome.insert(outcome))
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let ticket = self.begin_submit()?;
        let outcome = ticket.wait().await;
        self.finish_submit(outcome).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn filled_personal() -> StudentForm {
        let mut form = StudentForm::new().with_submit_delay(Duration::from_millis(5));
        form.set_field(FormField::StudentId, "UPES2024001");
        form.set_field(FormField::FullName, "John Doe");
        form.set_field(FormField::DateOfBirth, "2003-04-12");
        form.set_field(FormField::Gender, "male");
        form.set_field(FormField::StudentEmail, "john.doe@upes.ac.in");
        form.set_field(FormField::PhoneNumber, "+91 98765 43210");
        form.set_field(FormField::Address, "Bidholi, Dehradun");
        form
    }

    #[test]
    fn set_field_validates_and_clears() {
        let mut form = StudentForm::new();
        form.set_field(FormField::AadharNumber, "12345678901");
        assert_eq!(
            form.error(FormField::AadharNumber),
            Some(validation::INVALID_AADHAR)
        );

        form.set_field(FormField::AadharNumber, "123456789012");
        assert_eq!(form.error(FormField::AadharNumber), None);
        assert_eq!(form.value(FormField::AadharNumber), "123456789012");

        form.set_field(FormField::CurrentCgpa, "11");
        assert!(form.error(FormField::CurrentCgpa).is_some());
        form.set_field(FormField::CurrentCgpa, "");
        assert!(form.error(FormField::CurrentCgpa).is_none());
    }

    #[test]
    fn blank_personal_step_blocks_with_seven_errors() {
        let mut form = StudentForm::new();
        assert!(!form.advance());
        assert_eq!(form.step(), FormStep::Personal);
        assert_eq!(form.errors().len(), 7);
        for field in FormField::REQUIRED {
            assert_eq!(form.error(field), Some(validation::REQUIRED));
        }
    }

    #[test]
    fn one_missing_field_blocks() {
        let mut form = filled_personal();
        form.set_field(FormField::Address, "");
        assert!(!form.advance());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.error(FormField::Address), Some(validation::REQUIRED));

        form.set_field(FormField::Address, "Bidholi, Dehradun");
        assert!(form.error(FormField::Address).is_none());
        assert!(form.advance());
        assert_eq!(form.step(), FormStep::Academic);
    }

    #[test]
    fn later_steps_advance_freely_and_cap_at_last() {
        let mut form = filled_personal();
        assert!(form.advance());
        form.set_field(FormField::AttendancePercentage, "140");
        assert!(form.error(FormField::AttendancePercentage).is_some());

        assert!(form.advance());
        assert_eq!(form.step(), FormStep::Additional);
        assert!(form.errors().is_empty());

        assert!(form.advance());
        assert_eq!(form.step(), FormStep::Additional);
        assert_eq!(form.progress(), (3, 3));
    }

    #[test]
    fn retreat_floors_at_first_step() {
        let mut form = filled_personal();
        form.retreat();
        assert_eq!(form.step(), FormStep::Personal);
        form.advance();
        form.advance();
        form.retreat();
        assert_eq!(form.step(), FormStep::Academic);
        form.retreat();
        form.retreat();
        assert_eq!(form.step(), FormStep::Personal);
    }

    #[test]
    fn prefilled_form_keeps_values() {
        let mut draft = StudentDraft::default();
        draft.personal.full_name = "Riya Sen".to_string();
        draft.academic.semester = "4".to_string();
        let form = StudentForm::with_initial(draft);
        assert_eq!(form.value(FormField::FullName), "Riya Sen");
        assert_eq!(form.value(FormField::Semester), "4");
        assert_eq!(form.progress(), (1, 3));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn faculty_reaches_the_academic_step_on_a_loaded_record() {
        let mut form = StudentForm::new();
        assert!(!form.advance());

        let record = crate::roster::faculty_record("UPES2022002").unwrap();
        form.load(record);
        assert!(form.errors().is_empty());
        assert!(form.advance());
        assert_eq!(form.step(), FormStep::Academic);

        assert!(policy::editable(Role::Faculty, FormField::CurrentCgpa));
        form.set_field(FormField::CurrentCgpa, "9.0");
        assert_eq!(form.value(FormField::CurrentCgpa), "9.0");
        assert_eq!(form.value(FormField::FullName), "Jane Smith");
    }

    #[test]
    fn submit_refused_before_last_step() {
        let mut form = filled_personal();
        assert_eq!(form.begin_submit().unwrap_err(), FormError::NotOnFinalStep);
        assert!(!form.is_submitting());
    }

    #[test]
    fn finish_without_begin_is_refused() {
        let mut form = StudentForm::new();
        let outcome = SubmitOutcome {
            student_id: String::new(),
            message: SAVED_MESSAGE,
        };
        assert_eq!(form.finish_submit(outcome).unwrap_err(), FormError::NotSubmitting);
    }

    #[tokio::test]
    async fn submit_reports_success_and_resets() {
        let mut form = filled_personal();
        form.advance();
        form.set_field(FormField::CurrentCgpa, "8.75");
        form.advance();

        let outcome = form.submit().await.unwrap();
        assert_eq!(outcome.message, SAVED_MESSAGE);
        assert_eq!(outcome.student_id, "UPES2024001");

        assert_eq!(form.draft(), &StudentDraft::default());
        assert_eq!(form.step(), FormStep::Personal);
        assert!(!form.is_submitting());
        assert_eq!(form.last_outcome(), Some(&outcome));
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_pending_is_refused() {
        let mut form = filled_personal().with_submit_delay(DEFAULT_SUBMIT_DELAY);
        form.advance();
        form.advance();

        let ticket = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit().unwrap_err(), FormError::AlreadySubmitting);
        assert_eq!(ticket.draft().personal.full_name, "John Doe");

        let outcome = ticket.wait().await;
        form.finish_submit(outcome).unwrap();
        assert!(!form.is_submitting());
    }
}
