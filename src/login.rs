use crate::error::LoginError;
use crate::session::{Role, SessionRecord};
use crate::student_form::validation::is_valid_email;

/// State of the login page. Credentials are collected but not verified.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Display name; derived from the email when left blank.
    pub name: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: Role::Student,
            name: String::new(),
        }
    }
}

impl LoginForm {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Builds the session record for `institution`. The login page is
    /// reachable without one, so an empty institution is recorded as is.
    pub fn submit(&self, institution: &str) -> Result<SessionRecord, LoginError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(LoginError::MissingEmail);
        }
        if !is_valid_email(email) {
            return Err(LoginError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(LoginError::MissingPassword);
        }
        let institution = institution.trim();

        let name = match self.name.trim() {
            "" => name_from_email(email),
            given => given.to_string(),
        };

        Ok(SessionRecord {
            email: email.to_string(),
            role: self.role,
            institution: institution.to_string(),
            name,
            id: user_id_from_email(email),
        })
    }

    pub fn clear(&mut self) {
        self.password.clear();
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// `priya.sharma@upes.ac.in` -> `priya-sharma`
pub fn user_id_from_email(email: &str) -> String {
    let mut id = String::new();
    for ch in local_part(email).chars() {
        if ch.is_ascii_alphanumeric() {
            id.push(ch.to_ascii_lowercase());
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    let trimmed = id.trim_end_matches('-');
    if trimmed.is_empty() {
        "user".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `priya.sharma@upes.ac.in` -> `Priya Sharma`
pub fn name_from_email(email: &str) -> String {
    local_part(email)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
