use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use tracing::warn;

/// Hash verified when a login names an unknown user, so both rejection paths do the same work.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("attendance-dummy-password").ok());

/// Salted argon2 hash in PHC string form.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Check `password` against a stored PHC hash. Unparseable hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            warn!(err = %e, "stored password hash is not a PHC string");
            false
        }
    }
}

/// Burn one verification against the dummy hash.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
