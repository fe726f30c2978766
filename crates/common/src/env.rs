//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the stores are opened.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists and is a directory.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{data_dir} exists but is not a directory")),
        Err(_) => {
            tokio::fs::create_dir_all(data_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
            info!(%data_dir, "created data directory");
            Ok(())
        }
    }
}

/// Warn about store files that are missing; they start out empty.
pub async fn report_missing_files(paths: &[&Path]) {
    for path in paths {
        if tokio::fs::metadata(path).await.is_err() {
            warn!(path = %path.display(), "store file not found; starting with an empty list");
        }
    }
}
