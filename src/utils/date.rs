//! Frontmatter and git date handling.
//!
//! Frontmatter dates are free-form strings written by humans; git dates are
//! epoch milliseconds. Both normalize into `DateTime<Utc>` here so feed
//! generators only ever deal with one type.
//!
//! # Accepted frontmatter forms
//!
//! ```text
//! 2024-06-15
//! 2024-06-15 14:30
//! 2024-06-15 14:30:45
//! 2024-06-15T14:30:45
//! 2024-06-15T14:30:45Z
//! 2024-06-15T14:30:45+08:00
//! 2024/06/15
//! ```
//!
//! Naive forms (no offset) are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Naive datetime layouts tried in order after RFC 3339.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a frontmatter date string.
///
/// Returns `None` for anything unrecognized (including impossible dates
/// like `2023-02-29`); callers degrade to "no date" instead of failing.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(s, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// Convert git epoch milliseconds into a UTC datetime.
pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// Format as RFC 2822 for RSS (`Sat, 15 Jun 2024 14:30:45 GMT`).
pub fn to_rfc2822(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Format as RFC 3339 for Atom and JSON Feed (`2024-06-15T14:30:45Z`).
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
