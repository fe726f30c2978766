//! Service layer for the attendance API.
//! - `storage` / `file`: flat JSON stores, one authoritative list per file.
//! - `repository`: traits the services depend on, with in-memory mocks.
//! - `auth`, `users`, `attendance`: business rules, independent of the web framework.

pub mod errors;
pub mod storage;
pub mod repository;
pub mod file;
pub mod auth;
pub mod users;
pub mod attendance;
#[cfg(test)]
pub mod test_support;
