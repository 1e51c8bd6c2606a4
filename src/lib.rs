//! EvolveEd: an educational portal with institution selection, role-based
//! sign-in, per-role dashboards and a three-step student information form.

pub mod cli;
pub mod dashboards;
pub mod error;
pub mod institutions;
pub mod login;
pub mod navigation;
pub mod roster;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod student_form;
