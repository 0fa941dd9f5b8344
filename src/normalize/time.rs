//! Timestamp parsing
//!
//! Accepts the export format (`2016-04-15T05:19:46 -10:00`) as well as
//! RFC 3339 and a few close variants. Timestamps without an offset are
//! read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S %:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %:z",
    "%Y-%m-%d %H:%M:%S %z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a timestamp and convert it to UTC
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Some(time.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(time) = DateTime::parse_from_str(input, format) {
            return Some(time.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(input, format) {
            return Some(time.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
}
