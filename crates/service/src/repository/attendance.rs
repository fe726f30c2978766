use async_trait::async_trait;
use chrono::NaiveDate;
use models::AttendanceRecord;

use crate::errors::ServiceError;

/// Repository abstraction for attendance records.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Records of `username` dated within `[start, end]`, in insertion order.
    async fn find_in_range(&self, username: &str, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord>;

    /// Append `record`; fails with [`ServiceError::Conflict`] if `(username, date)` already exists.
    async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAttendanceRepository {
        records: Mutex<Vec<AttendanceRecord>>,
    }

    impl MockAttendanceRepository {
        pub fn all(&self) -> Vec<AttendanceRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AttendanceRepository for MockAttendanceRepository {
        async fn find_in_range(&self, username: &str, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord> {
            let records = self.records.lock().unwrap();
            records.iter().filter(|r| r.username == username && r.within(start, end)).cloned().collect()
        }

        async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord, ServiceError> {
            let mut records = self.records.lock().unwrap();
            if records.iter().any(|r| r.is_for(&record.username, record.date)) {
                return Err(ServiceError::Conflict("attendance already marked".into()));
            }
            records.push(record.clone());
            Ok(record)
        }
    }
}
