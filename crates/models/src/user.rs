use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A registered user as persisted in the users file.
///
/// Older files store the hash under `password`; it is accepted on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(alias = "password")]
    pub password_hash: String,
    pub device_key: String,
}

/// Registration payload as received from clients. Every field is optional on the wire so that
/// missing and empty values are reported the same way.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub device_key: Option<String>,
}

/// Registration fields after presence checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedNewUser {
    pub username: String,
    pub password: String,
    pub device_key: String,
}

impl NewUser {
    pub fn validate(self) -> Result<ValidatedNewUser, ModelError> {
        match (non_empty(self.username), non_empty(self.password), non_empty(self.device_key)) {
            (Some(username), Some(password), Some(device_key)) => Ok(ValidatedNewUser { username, password, device_key }),
            _ => Err(ModelError::Validation("All fields are required".into())),
        }
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Linear lookup by username.
pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    users.iter().find(|u| u.username == username)
}
