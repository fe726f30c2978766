use std::sync::Arc;

use models::user::NewUser;
use models::User;
use tracing::{debug, info, instrument};

use super::errors::RegistrationError;
use crate::auth::password;
use crate::errors::ServiceError;
use crate::repository::UserRepository;

/// Creates user records; usernames are unique.
pub struct RegistrationService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> RegistrationService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a new user with a hashed password.
    ///
    /// The created record, hash included, is returned as stored.
    ///
    /// # Examples
    /// ```
    /// use service::users::RegistrationService;
    /// use service::repository::user::mock::MockUserRepository;
    /// use models::user::NewUser;
    /// use std::sync::Arc;
    /// let svc = RegistrationService::new(Arc::new(MockUserRepository::default()));
    /// let input = NewUser { username: Some("alice".into()), password: Some("pw".into()), device_key: Some("dev-1".into()) };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// assert_ne!(user.password_hash, "pw");
    /// ```
    #[instrument(skip(self, input), fields(username = input.username.as_deref().unwrap_or("")))]
    pub async fn register(&self, input: NewUser) -> Result<User, RegistrationError> {
        let input = input.validate().map_err(|_| RegistrationError::MissingFields)?;

        // cheap pre-check so duplicates don't pay for hashing; create() re-checks under the lock
        if self.repo.find_by_username(&input.username).await.is_some() {
            debug!("user exists");
            return Err(RegistrationError::Duplicate);
        }

        let hash = password::hash_password(&input.password).map_err(|e| RegistrationError::HashError(e.to_string()))?;
        let user = User { username: input.username, password_hash: hash, device_key: input.device_key };

        let created = self.repo.create(user).await.map_err(|e| match e {
            ServiceError::Conflict(_) => RegistrationError::Duplicate,
            other => RegistrationError::Storage(other.to_string()),
        })?;
        info!(username = %created.username, "user_registered");
        Ok(created)
    }
}
