use once_cell::sync::Lazy;
use regex::Regex;

use super::fields::{FormField, StudentDraft};

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";
pub const CGPA_OUT_OF_RANGE: &str = "CGPA must be between 0 and 10";
pub const ATTENDANCE_OUT_OF_RANGE: &str = "Attendance must be between 0 and 100%";
pub const INVALID_AADHAR: &str = "Aadhar number must be 12 digits";
pub const REQUIRED: &str = "This field is required";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern"));
static AADHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("aadhar pattern"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn is_valid_aadhar(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    AADHAR.is_match(&digits)
}

fn number_in_range(value: &str, min: f64, max: f64) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n.is_finite() && (min..=max).contains(&n))
        .unwrap_or(false)
}

/// Checks one field on its own. Empty values always pass; whether a field
/// may be empty is decided per step.
pub fn validate_field(field: FormField, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }

    match field {
        FormField::StudentEmail if !is_valid_email(value) => Some(INVALID_EMAIL),
        FormField::PhoneNumber
        | FormField::GuardianPhoneNumber
        | FormField::EmergencyContactNumber
            if !is_valid_phone(value) =>
        {
            Some(INVALID_PHONE)
        }
        FormField::CurrentCgpa | FormField::PreviousSemesterCgpa
            if !number_in_range(value, 0.0, 10.0) =>
        {
            Some(CGPA_OUT_OF_RANGE)
        }
        FormField::AttendancePercentage if !number_in_range(value, 0.0, 100.0) => {
            Some(ATTENDANCE_OUT_OF_RANGE)
        }
        FormField::AadharNumber if !is_valid_aadhar(value) => Some(INVALID_AADHAR),
        _ => None,
    }
}

/// Required fields that are still empty, in form order.
pub fn missing_required(draft: &StudentDraft) -> Vec<FormField> {
    FormField::REQUIRED
        .iter()
        .copied()
        .filter(|f| draft.get(*f).is_empty())
        .collect()
}
