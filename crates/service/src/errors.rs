use thiserror::Error;

/// Errors raised by stores and repositories.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}
