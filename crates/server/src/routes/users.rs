use axum::{extract::State, http::StatusCode, Json};
use models::{user::NewUser, User};
use serde::Serialize;

use crate::errors::{ApiError, ApiJson};
use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct RegisterOutput {
    pub message: &'static str,
    pub user: User,
}

pub async fn register(State(state): State<ServerState>, ApiJson(input): ApiJson<NewUser>) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let user = state.registration.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { message: "User registered successfully!", user })))
}
