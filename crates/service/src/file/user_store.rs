use std::{path::PathBuf, sync::Arc};

use models::{user, User};
use tracing::debug;

use crate::errors::ServiceError;
use crate::repository::UserRepository;
use crate::storage::json_list_store::JsonListStore;

/// File-backed store for user records, persisted as a JSON array.
pub struct UserStore {
    store: Arc<JsonListStore<User>>,
}

impl UserStore {
    /// Open the store from the given file path. A missing file means no users yet.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<User>::open(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn list(&self) -> Vec<User> {
        self.store.list().await
    }

    pub async fn count(&self) -> usize {
        self.store.list().await.len()
    }
}

#[async_trait::async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.store.find(|u| u.username == username).await
    }

    async fn create(&self, new_user: User) -> Result<User, ServiceError> {
        let created = self
            .store
            .update(|users| {
                if user::find_by_username(users, &new_user.username).is_some() {
                    return Err(ServiceError::Conflict("user already exists".into()));
                }
                users.push(new_user.clone());
                Ok(new_user)
            })
            .await?;
        debug!(username = %created.username, path = %self.store.path().display(), "user persisted");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_path;

    fn user(name: &str) -> User {
        User { username: name.into(), password_hash: "$argon2id$stub".into(), device_key: format!("{name}-device") }
    }

    #[tokio::test]
    async fn user_store_create_find_and_reload() -> Result<(), anyhow::Error> {
        let tmp = temp_path("users");
        let store = UserStore::open(&tmp).await?;
        assert_eq!(store.count().await, 0);

        store.create(user("alice")).await?;
        store.create(user("bob")).await?;
        assert_eq!(store.find_by_username("bob").await, Some(user("bob")));
        assert!(store.find_by_username("carol").await.is_none());

        let reopened = UserStore::open(&tmp).await?;
        assert_eq!(reopened.list().await, vec![user("alice"), user("bob")]);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn user_store_rejects_duplicate_username() -> Result<(), anyhow::Error> {
        let tmp = temp_path("users_dup");
        let store = UserStore::open(&tmp).await?;
        store.create(user("alice")).await?;
        let err = store.create(user("alice")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(store.count().await, 1);
        assert_eq!(UserStore::open(&tmp).await?.count().await, 1);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn user_store_reads_legacy_password_key() -> Result<(), anyhow::Error> {
        let tmp = temp_path("users_legacy");
        tokio::fs::write(&tmp, br#"[{"username": "old", "password": "scrypt:abc", "device_key": "k"}]"#).await?;
        let store = UserStore::open(&tmp).await?;
        let found = store.find_by_username("old").await.expect("legacy user");
        assert_eq!(found.password_hash, "scrypt:abc");
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
