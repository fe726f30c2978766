//! Persistence seams used by the services.
//!
//! The file-backed stores in [`crate::file`] implement these traits; [`user::mock`] and
//! [`attendance::mock`] provide in-memory versions for tests.

pub mod user;
pub mod attendance;

pub use attendance::AttendanceRepository;
pub use user::UserRepository;
