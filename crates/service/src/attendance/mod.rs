//! Marking and querying daily attendance.

pub mod errors;
pub mod service;

pub use errors::AttendanceError;
pub use service::{AttendanceService, MarkInput, RecordsQuery};
