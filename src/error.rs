use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not encode session record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session store I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("no institution selected")]
    NoInstitutionSelected,
    #[error("`{action}` is not available from {from}")]
    InvalidTransition { action: &'static str, from: String },
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("the form can only be submitted from the final step")]
    NotOnFinalStep,
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("no submission is in progress")]
    NotSubmitting,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
}
