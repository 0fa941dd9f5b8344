//! Canonical values produced by normalization
//!
//! A `Key` is what the store compares: index bucket keys, primary-table
//! keys, and the refs held inside buckets are all keys.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use std::fmt;

/// UTC instant decomposed into its six calendar components.
///
/// Field order gives the same ordering as walking
/// year → month → day → hour → minute → second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeParts {
    pub fn as_tuple(&self) -> (i32, u32, u32, u32, u32, u32) {
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl From<DateTime<Utc>> for TimeParts {
    fn from(time: DateTime<Utc>) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        }
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Normalized scalar
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// The "no value" sentinel: empty input, missing fields, and
    /// unparsable timestamps all land here
    Empty,
    Boolean(bool),
    Integer(i64),
    /// Lower-cased text
    Text(String),
    Time(TimeParts),
}

impl Key {
    pub fn is_empty(&self) -> bool {
        matches!(self, Key::Empty)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Empty => Ok(()),
            Key::Boolean(value) => write!(f, "{}", value),
            Key::Integer(value) => write!(f, "{}", value),
            Key::Text(value) => f.write_str(value),
            Key::Time(parts) => write!(f, "{}", parts),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Integer(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Boolean(value)
    }
}

/// Builds a text key as-is; callers outside the normalizer are responsible
/// for lower-casing.
impl From<&str> for Key {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Key::Empty
        } else {
            Key::Text(value.to_string())
        }
    }
}

impl From<TimeParts> for Key {
    fn from(parts: TimeParts) -> Self {
        Key::Time(parts)
    }
}

/// Result of normalizing one raw field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Scalar(Key),
    /// Array field: one key per element, in element order
    Many(Vec<Key>),
}

impl Normalized {
    /// Every key the value contributes to the index
    pub fn keys(&self) -> &[Key] {
        match self {
            Normalized::Scalar(key) => std::slice::from_ref(key),
            Normalized::Many(keys) => keys,
        }
    }

    pub fn into_keys(self) -> Vec<Key> {
        match self {
            Normalized::Scalar(key) => vec![key],
            Normalized::Many(keys) => keys,
        }
    }

    /// The single key of a scalar value; `None` for array values
    pub fn into_scalar(self) -> Option<Key> {
        match self {
            Normalized::Scalar(key) => Some(key),
            Normalized::Many(_) => None,
        }
    }
}
