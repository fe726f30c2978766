use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Secret used when neither `auth.jwt_secret` nor `JWT_SECRET` is provided.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Locations of the two flat JSON files.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_attendance_file")]
    pub attendance_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), users_file: default_users_file(), attendance_file: default_attendance_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::default(), filter: default_log_filter() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_data_dir() -> String { "data".into() }
fn default_users_file() -> String { "users.json".into() }
fn default_attendance_file() -> String { "attendance.json".into() }
fn default_access_ttl() -> u64 { 15 * 60 }
fn default_refresh_ttl() -> u64 { 30 * 24 * 60 * 60 }
fn default_log_filter() -> String { "info,tower_http=info,axum=info".into() }

/// Path of the config file: `CONFIG_PATH` or `config.toml`.
pub fn default_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&default_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load the config file if present (defaults otherwise), apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = default_path();
        let mut cfg = if Path::new(&path).exists() { load_from_file(&path)? } else { AppConfig::default() };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Override selected keys from the environment. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if self.auth.jwt_secret.trim().is_empty() {
            if let Some(secret) = lookup("JWT_SECRET") {
                self.auth.jwt_secret = secret;
            }
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) => return Err(anyhow!("server.worker_threads must be at least 1")),
            None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.users_file.trim().is_empty() || self.attendance_file.trim().is_empty() {
            return Err(anyhow!("storage.users_file and storage.attendance_file must be non-empty"));
        }
        if self.users_file == self.attendance_file {
            return Err(anyhow!("users and attendance must be stored in different files"));
        }
        Ok(())
    }

    pub fn users_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.users_file)
    }

    pub fn attendance_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.attendance_file)
    }
}

impl AuthConfig {
    fn validate(&self) -> Result<()> {
        if self.access_token_ttl_secs == 0 || self.refresh_token_ttl_secs == 0 {
            return Err(anyhow!("token lifetimes must be positive"));
        }
        if self.access_token_ttl_secs >= self.refresh_token_ttl_secs {
            return Err(anyhow!("auth.access_token_ttl_secs must be shorter than auth.refresh_token_ttl_secs"));
        }
        Ok(())
    }

    /// Configured secret, or the development fallback. The flag is true when the fallback was used.
    pub fn secret_or_dev(&self) -> (String, bool) {
        if self.jwt_secret.trim().is_empty() {
            (DEV_JWT_SECRET.to_string(), true)
        } else {
            (self.jwt_secret.clone(), false)
        }
    }
}
