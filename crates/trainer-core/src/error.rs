//! Core error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainerError {
    /// Malformed or missing data in a supplied record. Never silently defaulted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required input was absent (blank position, blank chosen move).
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
}

impl From<serde_json::Error> for TrainerError {
    fn from(e: serde_json::Error) -> Self {
        TrainerError::Validation(format!("Malformed record JSON: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
