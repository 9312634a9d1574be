//! Date-string normalization to RFC 3339.
//!
//! Pure string-in/string-out helper used to decide whether a filter value is
//! typed `valueDate` or stays `valueString`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};

/// Error returned when a string does not look like a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotADate;

impl std::fmt::Display for NotADate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not a recognizable date")
    }
}

impl std::error::Error for NotADate {}

/// Normalize a date-like string to RFC 3339.
///
/// Accepts full timestamps with a UTC offset, naive timestamps (assumed to be
/// UTC, `T` or space separator), and bare dates (midnight UTC). Sub-second
/// digits appear only when non-zero; a zero offset renders as `Z`.
pub fn to_rfc3339(value: &str) -> Result<String, NotADate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
    }
    Err(NotADate)
}
