use std::sync::Arc;

use axum::{extract::{Request, State}, http::{header, HeaderMap, StatusCode}, middleware::Next, response::Response, Json};
use serde::Serialize;
use service::{
    attendance::AttendanceService,
    auth::{domain::LoginInput, AuthService, TokenKind},
    file::{AttendanceStore, UserStore},
    users::RegistrationService,
};
use tracing::warn;

use crate::errors::{ApiError, ApiJson};

/// Shared handler state. Both stores are opened once at startup and injected here.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<UserStore>>,
    pub registration: Arc<RegistrationService<UserStore>>,
    pub attendance: Arc<AttendanceService<AttendanceStore>>,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub message: &'static str,
    #[serde(rename = "access token")]
    pub access_token: String,
    #[serde(rename = "refresh token")]
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshOutput {
    #[serde(rename = "new access token")]
    pub new_access_token: String,
}

pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<LoginOutput>, ApiError> {
    let pair = state.auth.login(input).await?;
    Ok(Json(LoginOutput { message: "login was a success", access_token: pair.access_token, refresh_token: pair.refresh_token }))
}

/// Mint a new access token. The bearer must be a refresh token whose user still exists.
pub async fn refresh(State(state): State<ServerState>, headers: HeaderMap) -> Result<(StatusCode, Json<RefreshOutput>), ApiError> {
    let token = bearer_token(&headers)?;
    let new_access_token = state.auth.refresh(token).await.map_err(|e| {
        warn!(path = "/auth/refresh", err = %e, "refresh rejected");
        ApiError::from(e)
    })?;
    Ok((StatusCode::CREATED, Json(RefreshOutput { new_access_token })))
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization Header"))?;
    let bad = || ApiError::unauthorized("Bad Authorization header. Expected 'Authorization: Bearer <JWT>'");
    let value = value.to_str().map_err(|_| bad())?;
    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(bad()),
    }
}

/// Route middleware: the request must carry a valid access token.
pub async fn require_access_token(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let identity = bearer_token(req.headers()).and_then(|token| state.auth.authenticate(token, TokenKind::Access).map_err(ApiError::from));
    match identity {
        Ok(identity) => {
            // 身份注入请求扩展，供后续 handler 读取
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, err = %e.message, "token validation failed");
            Err(e)
        }
    }
}
