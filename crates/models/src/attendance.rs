use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;

pub const DEFAULT_STATUS: &str = "Present";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lower bound used by record queries that omit `start_date`.
pub fn default_query_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// `null` in older files reads as the default status.
fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

/// One attendance entry. `(username, date)` is unique within a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub username: String,
    pub date: NaiveDate,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
}

impl AttendanceRecord {
    pub fn new(username: impl Into<String>, date: NaiveDate, status: Option<String>) -> Self {
        Self { username: username.into(), date, status: status.unwrap_or_else(default_status) }
    }

    pub fn is_for(&self, username: &str, date: NaiveDate) -> bool {
        self.username == username && self.date == date
    }

    /// Inclusive on both ends.
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.date && self.date <= end
    }
}

/// Parse a `YYYY-MM-DD` calendar date. Unpadded month/day (`2024-3-5`) is accepted.
///
/// Only digits and `-` separators get through; chrono alone would also take signs and spaces.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ModelError> {
    let digits_and_dashes = raw.bytes().all(|b| b.is_ascii_digit() || b == b'-');
    if !raw.starts_with(|c: char| c.is_ascii_digit()) || !digits_and_dashes {
        return Err(ModelError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ModelError::InvalidDate(raw.to_string()))
}

/// Parse an optional date, falling back to `default` when absent.
pub fn parse_date_or(raw: Option<&str>, default: NaiveDate) -> Result<NaiveDate, ModelError> {
    match raw {
        Some(s) => parse_date(s),
        None => Ok(default),
    }
}
