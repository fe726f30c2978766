use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("Attendance already marked for this day")]
    Duplicate,
    #[error("storage error: {0}")]
    Storage(String),
}

impl AttendanceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AttendanceError::InvalidDateFormat => 3001,
            AttendanceError::Duplicate => 3002,
            AttendanceError::Storage(_) => 3200,
        }
    }
}
