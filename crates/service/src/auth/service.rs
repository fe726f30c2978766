use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{Identity, LoginInput, TokenPair};
use super::errors::AuthError;
use super::password;
use super::tokens::{TokenIssuer, TokenKind};
use crate::repository::UserRepository;

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
    tokens: TokenIssuer,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenIssuer) -> Self { Self { repo, tokens } }

    pub fn tokens(&self) -> &TokenIssuer { &self.tokens }

    /// Authenticate a user and issue an access/refresh token pair.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenIssuer, domain::LoginInput, password::hash_password};
    /// use service::repository::user::mock::MockUserRepository;
    /// use models::User;
    /// use std::sync::Arc;
    /// let hash = hash_password("Passw0rd").unwrap();
    /// let repo = Arc::new(MockUserRepository::with_users(vec![User { username: "u".into(), password_hash: hash, device_key: "d".into() }]));
    /// let issuer = TokenIssuer::new("secret", chrono::Duration::minutes(15), chrono::Duration::days(30));
    /// let svc = AuthService::new(repo, issuer);
    /// let pair = tokio_test::block_on(svc.login(LoginInput { username: Some("u".into()), password: Some("Passw0rd".into()) })).unwrap();
    /// assert!(!pair.access_token.is_empty());
    /// assert!(!pair.refresh_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = input.username.as_deref().unwrap_or("")))]
    pub async fn login(&self, input: LoginInput) -> Result<TokenPair, AuthError> {
        let username = input.username.filter(|s| !s.is_empty()).ok_or(AuthError::MissingCredentials)?;
        let pass = input.password.filter(|s| !s.is_empty()).ok_or(AuthError::MissingCredentials)?;

        let user = match self.repo.find_by_username(&username).await {
            Some(user) => user,
            None => {
                password::verify_dummy(&pass);
                warn!(reason = "unknown_user", "login_rejected");
                return Err(AuthError::InvalidUsername);
            }
        };

        if !password::verify_password(&pass, &user.password_hash) {
            warn!(reason = "bad_password", "login_rejected");
            return Err(AuthError::InvalidPassword);
        }

        let pair = TokenPair {
            access_token: self.tokens.issue(&user.username, TokenKind::Access, true)?,
            refresh_token: self.tokens.issue(&user.username, TokenKind::Refresh, false)?,
        };
        info!(username = %user.username, "login_succeeded");
        Ok(pair)
    }

    /// Verify a bearer token of the expected kind and return its identity.
    pub fn authenticate(&self, token: &str, expected: TokenKind) -> Result<Identity, AuthError> {
        self.tokens.identity(token, expected)
    }

    /// Mint a new (non-fresh) access token from a refresh token.
    ///
    /// The identity must still resolve to a stored user.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let identity = self.authenticate(refresh_token, TokenKind::Refresh)?;
        self.reissue(&identity).await
    }

    /// Issue a new access token for an identity already verified from a refresh token.
    pub async fn reissue(&self, identity: &Identity) -> Result<String, AuthError> {
        let user = self.repo.find_by_username(identity.username()).await.ok_or_else(|| {
            debug!(username = %identity, "refresh for unknown user");
            AuthError::UserNotFound
        })?;
        let token = self.tokens.issue(&user.username, TokenKind::Access, false)?;
        info!(username = %user.username, "access_token_refreshed");
        Ok(token)
    }
}
