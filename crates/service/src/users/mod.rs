//! User registration.

pub mod errors;
pub mod service;

pub use errors::RegistrationError;
pub use service::RegistrationService;
