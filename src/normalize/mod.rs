//! Value Normalizer
//!
//! Converts raw JSON values into the canonical keys used for indexing and
//! lookup. Ingestion and search share these functions, so a query value
//! always lands on the same key as the stored value it should match.
//!
//! Rules, in precedence order:
//!
//! ```text
//! ""              → Key::Empty (any type)
//! Integer         → base-10 i64          (else rejected)
//! Boolean         → true/false/"true"/"false" (else rejected)
//! Time            → UTC (y, m, d, h, m, s), unparsable → Key::Empty
//! String          → lower-cased text     (non-string rejected)
//! Array[T]        → one key per element, each under T
//! unknown field   → rejected
//! ```

mod time;
mod value;

pub use time::parse_timestamp;
pub use value::{Key, Normalized, TimeParts};

use crate::schema::{FieldDef, ScalarType, TypeTag};
use serde_json::Value;
use thiserror::Error;

/// A raw value that cannot be read as the expected type
#[derive(Error, Debug, Clone, PartialEq)]
#[error("value {value} is not a valid {}", expected_name(.expected))]
pub struct Rejected {
    /// Expected type; `None` when the field is not in the schema
    pub expected: Option<TypeTag>,
    pub value: Value,
}

impl Rejected {
    pub fn new(expected: Option<TypeTag>, value: &Value) -> Self {
        Self {
            expected,
            value: value.clone(),
        }
    }
}

fn expected_name(expected: &Option<TypeTag>) -> String {
    match expected {
        Some(tag) => tag.to_string(),
        None => "value for an unknown field".to_string(),
    }
}

/// Normalize a raw value for storage in the index
pub fn normalize(tag: TypeTag, raw: &Value) -> Result<Normalized, Rejected> {
    if is_empty_string(raw) {
        return Ok(Normalized::Scalar(Key::Empty));
    }

    match tag {
        TypeTag::Array(element) => match raw {
            Value::Array(items) => items
                .iter()
                .map(|item| normalize_scalar(element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Normalized::Many),
            _ => Err(Rejected::new(Some(tag), raw)),
        },
        TypeTag::Integer | TypeTag::String | TypeTag::Boolean | TypeTag::Time => {
            normalize_scalar(tag.element(), raw).map(Normalized::Scalar)
        }
    }
}

/// Normalize a value for a schema field; a missing field definition rejects
pub fn normalize_field(field: Option<&FieldDef>, raw: &Value) -> Result<Normalized, Rejected> {
    match field {
        Some(field) => normalize(field.type_tag, raw),
        None => Err(Rejected::new(None, raw)),
    }
}

/// Normalize a single search value.
///
/// Array fields are searched by element, so the query is read under the
/// element type.
pub fn normalize_query(tag: TypeTag, raw: &Value) -> Result<Key, Rejected> {
    normalize_scalar(tag.element(), raw)
}

fn normalize_scalar(scalar: ScalarType, raw: &Value) -> Result<Key, Rejected> {
    if is_empty_string(raw) {
        return Ok(Key::Empty);
    }

    let key = match scalar {
        ScalarType::Integer => parse_integer(raw).map(Key::Integer),
        ScalarType::Boolean => parse_boolean(raw).map(Key::Boolean),
        ScalarType::Time => Some(
            raw.as_str()
                .and_then(parse_timestamp)
                .map_or(Key::Empty, |time| Key::Time(TimeParts::from(time))),
        ),
        ScalarType::String => raw.as_str().map(|text| Key::Text(text.to_lowercase())),
    };

    key.ok_or_else(|| Rejected::new(Some(scalar.tag()), raw))
}

fn is_empty_string(raw: &Value) -> bool {
    matches!(raw, Value::String(text) if text.is_empty())
}

fn parse_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn parse_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) if text == "true" => Some(true),
        Value::String(text) if text == "false" => Some(false),
        _ => None,
    }
}
