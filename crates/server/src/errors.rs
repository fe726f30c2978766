use std::any::Any;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use serde::de::DeserializeOwned;
use service::{attendance::AttendanceError, auth::errors::AuthError, users::RegistrationError};
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every handler; rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidUsername | AuthError::InvalidPassword | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::HashError(_) | AuthError::TokenError(_) => {
                error!(code = e.code(), err = %e, "auth failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<RegistrationError> for ApiError {
    fn from(e: RegistrationError) -> Self {
        let status = match &e {
            RegistrationError::MissingFields => StatusCode::BAD_REQUEST,
            // duplicate usernames answer 401, kept for client compatibility
            RegistrationError::Duplicate => StatusCode::UNAUTHORIZED,
            RegistrationError::HashError(_) | RegistrationError::Storage(_) => {
                error!(code = e.code(), err = %e, "registration failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<AttendanceError> for ApiError {
    fn from(e: AttendanceError) -> Self {
        let status = match &e {
            AttendanceError::InvalidDateFormat | AttendanceError::Duplicate => StatusCode::BAD_REQUEST,
            AttendanceError::Storage(_) => {
                error!(code = e.code(), err = %e, "attendance failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

/// `Json<T>` whose rejection is a 400 `{"error": ...}` instead of axum's plain-text body.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                warn!(err = %rejection.body_text(), "rejected request body");
                Err(ApiError::bad_request(rejection.body_text()))
            }
        }
    }
}

/// Turns a handler panic into a 500 JSON response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "handler panicked");
    ApiError::internal("Internal Server Error").into_response()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
