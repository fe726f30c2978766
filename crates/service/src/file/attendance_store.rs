use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use models::AttendanceRecord;
use tracing::debug;

use crate::errors::ServiceError;
use crate::repository::AttendanceRepository;
use crate::storage::json_list_store::JsonListStore;

/// File-backed store for attendance records, persisted as a JSON array.
pub struct AttendanceStore {
    store: Arc<JsonListStore<AttendanceRecord>>,
}

impl AttendanceStore {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<AttendanceRecord>::open(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn list(&self) -> Vec<AttendanceRecord> {
        self.store.list().await
    }
}

#[async_trait::async_trait]
impl AttendanceRepository for AttendanceStore {
    async fn find_in_range(&self, username: &str, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord> {
        self.store.filter(|r| r.username == username && r.within(start, end)).await
    }

    async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord, ServiceError> {
        let created = self
            .store
            .update(|records| {
                if records.iter().any(|r| r.is_for(&record.username, record.date)) {
                    return Err(ServiceError::Conflict("attendance already marked".into()));
                }
                records.push(record.clone());
                Ok(record)
            })
            .await?;
        debug!(username = %created.username, date = %created.date, "attendance persisted");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_path;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[tokio::test]
    async fn attendance_store_filters_by_user_and_range() -> Result<(), anyhow::Error> {
        let tmp = temp_path("attendance");
        let store = AttendanceStore::open(&tmp).await?;
        store.create(AttendanceRecord::new("alice", d(3), None)).await?;
        store.create(AttendanceRecord::new("bob", d(3), None)).await?;
        store.create(AttendanceRecord::new("alice", d(1), Some("Late".into()))).await?;
        store.create(AttendanceRecord::new("alice", d(9), None)).await?;

        let hits = store.find_in_range("alice", d(1), d(3)).await;
        // insertion order, not date order
        assert_eq!(hits.iter().map(|r| r.date).collect::<Vec<_>>(), vec![d(3), d(1)]);
        assert!(store.find_in_range("carol", d(1), d(31)).await.is_empty());
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn attendance_store_one_record_per_user_per_day() -> Result<(), anyhow::Error> {
        let tmp = temp_path("attendance_dup");
        let store = AttendanceStore::open(&tmp).await?;
        store.create(AttendanceRecord::new("alice", d(3), None)).await?;
        let err = store.create(AttendanceRecord::new("alice", d(3), Some("Absent".into()))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let reopened = AttendanceStore::open(&tmp).await?;
        let all = reopened.list().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, "Present");
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn attendance_store_reads_null_status_as_present() -> Result<(), anyhow::Error> {
        let tmp = temp_path("attendance_null_status");
        tokio::fs::write(
            &tmp,
            br#"[{"username": "alice", "date": "2024-05-01", "status": "Present"},
                 {"username": "alice", "date": "2024-05-02", "status": null}]"#,
        )
        .await?;
        let store = AttendanceStore::open(&tmp).await?;
        let all = store.list().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].status, "Present");

        // a later write keeps the older records
        store.create(AttendanceRecord::new("alice", d(3), None)).await?;
        assert_eq!(AttendanceStore::open(&tmp).await?.list().await.len(), 3);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
