//! JSON file-backed stores for users and attendance records.

pub mod user_store;
pub mod attendance_store;

pub use attendance_store::AttendanceStore;
pub use user_store::UserStore;
