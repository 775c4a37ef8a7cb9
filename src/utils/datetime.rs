//! Date/time helpers for ghw

use chrono::{DateTime, SecondsFormat, Utc};

/// Convert epoch seconds to a UTC timestamp
pub fn parse_unix_timestamp(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
}

/// Render epoch seconds as RFC 3339 in UTC, e.g. `2023-11-14T22:13:20Z`.
/// Values chrono cannot represent fall back to the raw number.
pub fn format_epoch_rfc3339(timestamp: i64) -> String {
    parse_unix_timestamp(timestamp)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| timestamp.to_string())
}
