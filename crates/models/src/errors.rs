use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}
