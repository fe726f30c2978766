use std::{path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::{
    attendance::AttendanceService,
    auth::{AuthService, TokenIssuer},
    file::{AttendanceStore, UserStore},
    users::RegistrationService,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open both stores and wire the services around them.
pub async fn build_state(users_path: &Path, attendance_path: &Path, tokens: TokenIssuer) -> Result<ServerState, StartupError> {
    let users = UserStore::open(users_path).await.map_err(|e| StartupError::Storage(e.to_string()))?;
    let attendance = AttendanceStore::open(attendance_path).await.map_err(|e| StartupError::Storage(e.to_string()))?;
    info!(users = users.count().await, records = attendance.list().await.len(), "stores loaded");

    Ok(ServerState {
        auth: Arc::new(AuthService::new(Arc::clone(&users), tokens)),
        registration: Arc::new(RegistrationService::new(users)),
        attendance: Arc::new(AttendanceService::new(attendance)),
    })
}

/// Token issuer from the `[auth]` section; falls back to the development secret.
pub fn token_issuer(cfg: &AppConfig) -> Result<TokenIssuer, StartupError> {
    let (secret, is_dev) = cfg.auth.secret_or_dev();
    if is_dev {
        warn!("JWT_SECRET not set; using the development secret");
    }
    let ttl = |secs: u64| {
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| StartupError::InvalidConfig(format!("token lifetime out of range: {secs}s")))
    };
    Ok(TokenIssuer::new(&secret, ttl(cfg.auth.access_token_ttl_secs)?, ttl(cfg.auth.refresh_token_ttl_secs)?))
}

/// Build the router from a validated config.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let users_path = cfg.storage.users_path();
    let attendance_path = cfg.storage.attendance_path();
    common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    common::env::report_missing_files(&[users_path.as_path(), attendance_path.as_path()]).await;

    let state = build_state(&users_path, &attendance_path, token_issuer(cfg)?).await?;
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "attendance api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
