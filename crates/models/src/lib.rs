//! Record types persisted by the attendance service.
//!
//! Models are plain serde structs; persistence lives in the `service` crate.

pub mod errors;
pub mod user;
pub mod attendance;

pub use attendance::AttendanceRecord;
pub use user::User;
