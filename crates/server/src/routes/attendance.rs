use axum::{extract::{rejection::QueryRejection, Query, State}, http::StatusCode, Extension, Json};
use models::AttendanceRecord;
use serde::Serialize;
use service::{attendance::{MarkInput, RecordsQuery}, auth::domain::Identity};

use crate::errors::{ApiError, ApiJson};
use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct MarkOutput {
    pub message: &'static str,
    pub record: AttendanceRecord,
}

/// Mark attendance for the caller. The body must be a JSON object; `{}` marks today as Present.
pub async fn mark(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
    ApiJson(input): ApiJson<MarkInput>,
) -> Result<(StatusCode, Json<MarkOutput>), ApiError> {
    let record = state.attendance.mark(&identity, input).await?;
    Ok((StatusCode::CREATED, Json(MarkOutput { message: "Attendance marked successfully!", record })))
}

pub async fn records(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> Result<Json<Vec<AttendanceRecord>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let records = state.attendance.query(&identity, query).await?;
    Ok(Json(records))
}
