use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("User already exists")]
    Duplicate,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl RegistrationError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RegistrationError::MissingFields => 2001,
            RegistrationError::Duplicate => 2002,
            RegistrationError::HashError(_) => 2101,
            RegistrationError::Storage(_) => 2200,
        }
    }
}
