//! Timestamp parsing for document date strings.
//!
//! Post and calendar documents store dates as strings written by different
//! clients: full RFC 3339 timestamps, `datetime-local` values without an
//! offset, or bare dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored date string into a UTC timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T18:00:00Z`), naive date-times
/// (`2025-03-01T18:00`, `2025-03-01 18:00:00`) interpreted as UTC, and bare
/// dates (`2025-03-01`) at midnight UTC. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
