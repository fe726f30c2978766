#![cfg(test)]
use std::path::PathBuf;

/// Unique path under the system temp dir; the file itself is not created.
pub fn temp_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("attendance_{}_{}.json", prefix, uuid::Uuid::new_v4()))
}
