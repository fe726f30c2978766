//! JWT issuance and verification.
//!
//! Tokens are HS256-signed and stateless. Claims carry `sub`, `type`, `fresh`, `jti`, `iat`, `nbf`
//! and `exp`, the layout most JWT tooling expects.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::Identity;
use super::errors::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn wrong_kind_message(self) -> &'static str {
        match self {
            TokenKind::Access => "Only access tokens are allowed",
            TokenKind::Refresh => "Only refresh tokens are allowed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(default)]
    pub fresh: bool,
    pub jti: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with one shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn issue(&self, identity: &str, kind: TokenKind, fresh: bool) -> Result<String, AuthError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: identity.to_string(),
            kind,
            fresh,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and check signature, expiry, not-before and token type.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            let msg = match e.kind() {
                ErrorKind::ExpiredSignature => "Token has expired".to_string(),
                ErrorKind::InvalidSignature => "Signature verification failed".to_string(),
                ErrorKind::ImmatureSignature => "Token not yet valid".to_string(),
                _ => format!("Invalid token: {e}"),
            };
            AuthError::InvalidToken(msg)
        })?;

        if data.claims.kind != expected {
            return Err(AuthError::InvalidToken(expected.wrong_kind_message().into()));
        }
        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("Invalid token: empty subject".into()));
        }
        Ok(data.claims)
    }

    pub fn identity(&self, token: &str, expected: TokenKind) -> Result<Identity, AuthError> {
        self.verify(token, expected).map(|c| Identity(c.sub))
    }
}
