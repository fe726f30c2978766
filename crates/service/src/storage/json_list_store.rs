use std::{path::{Path, PathBuf}, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// The file holds a JSON array that is read once when the store is opened and rewritten in full,
/// pretty-printed, after every successful mutation. The in-memory list is the single source of
/// truth for reads; mutations run under the write lock for their whole check-modify-save sequence,
/// so concurrent writers are serialized.
pub struct JsonListStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
    file_path: PathBuf,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open the store at `path`. A missing or undecodable file yields an empty list.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }
        let items = Self::load(&file_path).await;
        debug!(path = %file_path.display(), count = items.len(), "json list store opened");
        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(items)), file_path }))
    }

    /// Read the persisted list. Never fails: absent or invalid content is treated as empty.
    pub async fn load(path: &Path) -> Vec<T> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %path.display(), err = %e, "store file is not a valid record list; treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the backing file with `items`.
    pub async fn save(path: &Path, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        fs::write(path, data).await.map_err(ServiceError::storage)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of all items, in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// First item matching the predicate.
    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().find(|item| pred(item)).cloned()
    }

    /// All items matching the predicate, in insertion order.
    pub async fn filter<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().filter(|item| pred(item)).cloned().collect()
    }

    /// Apply a mutation and persist it.
    ///
    /// `f` works on a copy of the list; the copy replaces the in-memory list only once it has been
    /// written to disk. If `f` or the write fails, nothing changes.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        Self::save(&self.file_path, &next).await?;
        *guard = next;
        Ok(out)
    }
}
