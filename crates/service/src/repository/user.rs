use async_trait::async_trait;
use models::User;

use crate::errors::ServiceError;

/// Repository abstraction for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Option<User>;

    /// Append `user`; fails with [`ServiceError::Conflict`] if the username is taken.
    async fn create(&self, user: User) -> Result<User, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl MockUserRepository {
        pub fn with_users(users: Vec<User>) -> Self {
            Self { users: Mutex::new(users) }
        }

        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_username(&self, username: &str) -> Option<User> {
            let users = self.users.lock().unwrap();
            models::user::find_by_username(&users, username).cloned()
        }

        async fn create(&self, user: User) -> Result<User, ServiceError> {
            let mut users = self.users.lock().unwrap();
            if models::user::find_by_username(&users, &user.username).is_some() {
                return Err(ServiceError::Conflict("user already exists".into()));
            }
            users.push(user.clone());
            Ok(user)
        }
    }
}
