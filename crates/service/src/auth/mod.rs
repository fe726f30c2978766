//! Auth module: credential checks and token issuance.
//!
//! Layered like the rest of the crate: domain types, errors, the token codec and the service.

pub mod domain;
pub mod errors;
pub mod password;
pub mod service;
pub mod tokens;

pub use service::AuthService;
pub use tokens::{TokenIssuer, TokenKind};
