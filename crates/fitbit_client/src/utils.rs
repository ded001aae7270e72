//! Date and time token formatting for resource paths.

use chrono::{NaiveDate, NaiveTime};

/// Path token for the current day, resolved server-side in the user's timezone.
pub const TODAY: &str = "today";

/// Parse a calendar date given as `YYYY-MM-DD`.
///
/// Accepts a full RFC3339 timestamp too and keeps only its local date part.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Parse a clock time given as `HH:mm` (or `HH:mm:ss`, seconds dropped later).
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}
