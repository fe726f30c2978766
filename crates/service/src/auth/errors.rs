use thiserror::Error;

/// Business errors for login, refresh and token verification
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username and password required")]
    MissingCredentials,
    #[error("username invalid")]
    InvalidUsername,
    #[error("invalid password")]
    InvalidPassword,
    #[error("user not found")]
    UserNotFound,
    #[error("{0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingCredentials => 1001,
            AuthError::InvalidUsername => 1002,
            AuthError::InvalidPassword => 1003,
            AuthError::UserNotFound => 1004,
            AuthError::InvalidToken(_) => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
        }
    }
}
