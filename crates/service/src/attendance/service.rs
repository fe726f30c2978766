use std::sync::Arc;

use chrono::{Local, NaiveDate};
use models::attendance::{default_query_start, parse_date_or};
use models::AttendanceRecord;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::errors::AttendanceError;
use crate::auth::domain::Identity;
use crate::errors::ServiceError;
use crate::repository::AttendanceRepository;

/// Body of a mark request; both fields fall back to defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters of a records lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Records and queries attendance, one record per user per day.
pub struct AttendanceService<R: AttendanceRepository> {
    repo: Arc<R>,
    today: fn() -> NaiveDate,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_clock(repo, local_today)
    }

    /// Same as [`AttendanceService::new`] with a custom source for "today".
    pub fn with_clock(repo: Arc<R>, today: fn() -> NaiveDate) -> Self {
        Self { repo, today }
    }

    #[instrument(skip(self, input), fields(username = %identity))]
    pub async fn mark(&self, identity: &Identity, input: MarkInput) -> Result<AttendanceRecord, AttendanceError> {
        let date = parse_date_or(input.date.as_deref(), (self.today)()).map_err(|_| AttendanceError::InvalidDateFormat)?;
        let record = AttendanceRecord::new(identity.username(), date, input.status);

        let created = self.repo.create(record).await.map_err(|e| match e {
            ServiceError::Conflict(_) => AttendanceError::Duplicate,
            other => AttendanceError::Storage(other.to_string()),
        })?;
        info!(date = %created.date, status = %created.status, "attendance_marked");
        Ok(created)
    }

    /// Records of `identity` within `[start_date, end_date]`, in store order.
    #[instrument(skip(self, query), fields(username = %identity))]
    pub async fn query(&self, identity: &Identity, query: RecordsQuery) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let start = parse_date_or(query.start_date.as_deref(), default_query_start()).map_err(|_| AttendanceError::InvalidDateFormat)?;
        let end = parse_date_or(query.end_date.as_deref(), (self.today)()).map_err(|_| AttendanceError::InvalidDateFormat)?;
        Ok(self.repo.find_in_range(identity.username(), start, end).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::attendance::mock::MockAttendanceRepository;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn svc() -> (Arc<MockAttendanceRepository>, AttendanceService<MockAttendanceRepository>) {
        let repo = Arc::new(MockAttendanceRepository::default());
        (Arc::clone(&repo), AttendanceService::with_clock(repo, fixed_today))
    }

    fn me() -> Identity {
        Identity("testuser".into())
    }

    fn mark_on(date: &str) -> MarkInput {
        MarkInput { date: Some(date.into()), status: None }
    }

    #[tokio::test]
    async fn mark_defaults_to_today_and_present() {
        let (_, svc) = svc();
        let rec = svc.mark(&me(), MarkInput::default()).await.unwrap();
        assert_eq!(rec.date, fixed_today());
        assert_eq!(rec.status, "Present");
        assert_eq!(rec.username, "testuser");
    }

    #[tokio::test]
    async fn mark_keeps_explicit_status_and_normalises_date() {
        let (repo, svc) = svc();
        let rec = svc.mark(&me(), MarkInput { date: Some("2024-6-3".into()), status: Some("Remote".into()) }).await.unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(rec.status, "Remote");
        assert_eq!(repo.all(), vec![rec]);
    }

    #[tokio::test]
    async fn mark_rejects_bad_date_and_duplicates() {
        let (repo, svc) = svc();
        assert!(matches!(svc.mark(&me(), mark_on("06/10/2024")).await, Err(AttendanceError::InvalidDateFormat)));
        svc.mark(&me(), mark_on("2024-06-10")).await.unwrap();
        assert!(matches!(svc.mark(&me(), mark_on("2024-06-10")).await, Err(AttendanceError::Duplicate)));
        // the default date is the same day, so it collides too
        assert!(matches!(svc.mark(&me(), MarkInput::default()).await, Err(AttendanceError::Duplicate)));
        assert_eq!(repo.all().len(), 1);

        // another user may mark the same day
        svc.mark(&Identity("other".into()), mark_on("2024-06-10")).await.unwrap();
        assert_eq!(repo.all().len(), 2);
    }

    #[tokio::test]
    async fn query_returns_inclusive_window_for_caller_only() {
        let (_, svc) = svc();
        for day in ["2024-06-08", "2024-06-09", "2024-06-10"] {
            svc.mark(&me(), mark_on(day)).await.unwrap();
        }
        svc.mark(&me(), mark_on("2024-05-01")).await.unwrap();
        svc.mark(&Identity("other".into()), mark_on("2024-06-09")).await.unwrap();

        let window = RecordsQuery { start_date: Some("2024-06-05".into()), end_date: Some("2024-06-10".into()) };
        let hits = svc.query(&me(), window).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|r| r.username == "testuser"));

        let edge = RecordsQuery { start_date: Some("2024-06-09".into()), end_date: Some("2024-06-09".into()) };
        assert_eq!(svc.query(&me(), edge).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_defaults_cover_2024_through_today() {
        let (_, svc) = svc();
        svc.mark(&me(), mark_on("2023-12-31")).await.unwrap();
        svc.mark(&me(), mark_on("2024-01-01")).await.unwrap();
        svc.mark(&me(), mark_on("2024-06-10")).await.unwrap();
        svc.mark(&me(), mark_on("2024-06-11")).await.unwrap();

        let hits = svc.query(&me(), RecordsQuery::default()).await.unwrap();
        let dates: Vec<String> = hits.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-06-10"]);
    }

    #[tokio::test]
    async fn query_rejects_bad_bounds() {
        let (_, svc) = svc();
        let bad = RecordsQuery { start_date: Some("yesterday".into()), end_date: None };
        assert!(matches!(svc.query(&me(), bad).await, Err(AttendanceError::InvalidDateFormat)));
        let bad = RecordsQuery { start_date: None, end_date: Some("2024-02-30".into()) };
        assert!(matches!(svc.query(&me(), bad).await, Err(AttendanceError::InvalidDateFormat)));
    }
}
