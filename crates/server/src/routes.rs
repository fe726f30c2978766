pub mod attendance;
pub mod auth;
pub mod users;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::{handle_panic, ApiError};
use auth::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn not_found() -> ApiError {
    ApiError::new(axum::http::StatusCode::NOT_FOUND, "Not Found")
}

/// Build the full application router: public routes and access-token routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/register", post(users::register))
        .route("/auth/login", post(auth::login))
        // verifies its own refresh token
        .route("/auth/refresh", post(auth::refresh));

    // Access token required
    let attendance = Router::new()
        .route("/attendance/mark", post(attendance::mark))
        .route("/attendance/records", get(attendance::records))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_access_token));

    public
        .merge(attendance)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
