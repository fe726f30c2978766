#![allow(dead_code)]
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use server::routes;
use server::startup::build_state;
use service::auth::{TokenIssuer, TokenKind};
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "test-secret";

pub fn issuer() -> TokenIssuer {
    TokenIssuer::new(SECRET, chrono::Duration::minutes(15), chrono::Duration::days(30))
}

/// Token signed with the test secret but already expired.
pub fn expired_access_token(username: &str) -> String {
    TokenIssuer::new(SECRET, chrono::Duration::seconds(-120), chrono::Duration::days(1))
        .issue(username, TokenKind::Access, true)
        .expect("issue expired token")
}

pub struct TestApp {
    pub router: Router,
    pub dir: PathBuf,
}

impl TestApp {
    pub fn users_path(&self) -> PathBuf { self.dir.join("users.json") }
    pub fn attendance_path(&self) -> PathBuf { self.dir.join("attendance.json") }

    /// Rebuild the app from the files on disk, as after a restart.
    pub async fn restart(&self) -> anyhow::Result<TestApp> {
        open(self.dir.clone()).await
    }

    pub async fn call(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, body))
    }

    pub async fn register(&self, username: &str, password: &str, device_key: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.call(post_json("/users/register", json!({"username": username, "password": password, "device_key": device_key}), None)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.call(post_json("/auth/login", json!({"username": username, "password": password}), None)).await
    }

    /// Register `testuser` and return its login response body.
    pub async fn signed_in(&self) -> anyhow::Result<Value> {
        let (status, _) = self.register("testuser", "testpass", "testkey").await?;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.login("testuser", "testpass").await?;
        assert_eq!(status, StatusCode::OK);
        Ok(body)
    }

    pub async fn mark(&self, token: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.call(post_json("/attendance/mark", body, Some(token))).await
    }

    pub async fn records(&self, token: &str, query: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.call(get("/attendance/records", query, Some(token))).await
    }
}

async fn open(dir: PathBuf) -> anyhow::Result<TestApp> {
    let state = build_state(&dir.join("users.json"), &dir.join("attendance.json"), issuer()).await?;
    let router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    Ok(TestApp { router, dir })
}

/// Fresh app over an isolated temp directory.
pub async fn build_app() -> anyhow::Result<TestApp> {
    let dir = std::env::temp_dir().join(format!("attendance_it_{}", Uuid::new_v4()));
    open(dir).await
}

pub fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    builder.body(Body::from(serde_json::to_vec(&body).expect("serialize body"))).expect("request")
}

pub fn get(uri: &str, query: &str, token: Option<&str>) -> Request<Body> {
    let uri = if query.is_empty() { uri.to_string() } else { format!("{uri}?{query}") };
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn token(body: &Value, key: &str) -> String {
    body[key].as_str().unwrap_or_default().to_string()
}

/// Well-formed access token signed with a different secret.
pub fn forged_access_token(username: &str) -> String {
    TokenIssuer::new("not-the-server-secret", chrono::Duration::minutes(15), chrono::Duration::days(30))
        .issue(username, TokenKind::Access, true)
        .expect("issue forged token")
}
