//! Core schema types
//!
//! - `RecordType`: the closed set of entity categories
//! - `TypeTag` / `ScalarType`: how a field's values are normalized and indexed
//! - `FieldDef`: one column of a record type

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::UnknownRecordType;

/// Entity category a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Users,
    Organizations,
    Tickets,
}

impl RecordType {
    /// Get all record types for iteration
    pub fn all() -> &'static [RecordType] {
        &[
            RecordType::Users,
            RecordType::Organizations,
            RecordType::Tickets,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Users => "users",
            RecordType::Organizations => "organizations",
            RecordType::Tickets => "tickets",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(RecordType::Users),
            "organizations" => Ok(RecordType::Organizations),
            "tickets" => Ok(RecordType::Tickets),
            other => Err(UnknownRecordType(other.to_string())),
        }
    }
}

/// Element type of a scalar field, or of each item of an array field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Integer,
    String,
    Boolean,
    Time,
}

impl ScalarType {
    /// The tag of a plain (non-array) field holding this scalar
    pub fn tag(self) -> TypeTag {
        match self {
            ScalarType::Integer => TypeTag::Integer,
            ScalarType::String => TypeTag::String,
            ScalarType::Boolean => TypeTag::Boolean,
            ScalarType::Time => TypeTag::Time,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ScalarType::Integer => "Integer",
            ScalarType::String => "String",
            ScalarType::Boolean => "Boolean",
            ScalarType::Time => "Time",
        }
    }
}

/// Type of a schema field
///
/// Drives both index-key normalization at ingestion time and query
/// normalization at search time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Integer,
    String,
    Boolean,
    Time,
    /// Multi-valued field; each element is indexed separately
    Array(ScalarType),
}

impl TypeTag {
    /// Scalar type of the field's values (the element type for arrays)
    pub fn element(self) -> ScalarType {
        match self {
            TypeTag::Integer => ScalarType::Integer,
            TypeTag::String => ScalarType::String,
            TypeTag::Boolean => ScalarType::Boolean,
            TypeTag::Time => ScalarType::Time,
            TypeTag::Array(element) => element,
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, TypeTag::Array(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Array(element) => write!(f, "Array[{}]", element.name()),
            scalar => f.write_str(scalar.element().name()),
        }
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scalar = |name: &str| match name {
            "Integer" => Some(ScalarType::Integer),
            "String" => Some(ScalarType::String),
            "Boolean" => Some(ScalarType::Boolean),
            "Time" => Some(ScalarType::Time),
            _ => None,
        };

        let parsed = match s.strip_prefix("Array[").and_then(|rest| rest.strip_suffix(']')) {
            Some(inner) => scalar(inner).map(TypeTag::Array),
            None => scalar(s).map(ScalarType::tag),
        };

        parsed.ok_or_else(|| format!("unknown type tag '{}'", s))
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One field of a record type's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub primary_key: bool,
}

impl FieldDef {
    /// Regular (indexed) field
    pub const fn new(name: &'static str, type_tag: TypeTag) -> Self {
        Self {
            name,
            type_tag,
            primary_key: false,
        }
    }

    /// The record type's primary key
    pub const fn primary(name: &'static str, type_tag: TypeTag) -> Self {
        Self {
            name,
            type_tag,
            primary_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_parse() {
        assert_eq!("users".parse::<RecordType>().unwrap(), RecordType::Users);
        assert_eq!(
            "organizations".parse::<RecordType>().unwrap(),
            RecordType::Organizations
        );
        assert_eq!("tickets".parse::<RecordType>().unwrap(), RecordType::Tickets);

        let err = "widgets".parse::<RecordType>().unwrap_err();
        assert_eq!(err, UnknownRecordType("widgets".to_string()));
    }

    #[test]
    fn test_record_type_display_roundtrip() {
        for record_type in RecordType::all() {
            let parsed: RecordType = record_type.to_string().parse().unwrap();
            assert_eq!(parsed, *record_type);
        }
    }

    #[test]
    fn test_type_tag_display() {
        assert_eq!(TypeTag::Integer.to_string(), "Integer");
        assert_eq!(TypeTag::Time.to_string(), "Time");
        assert_eq!(
            TypeTag::Array(ScalarType::String).to_string(),
            "Array[String]"
        );
    }

    #[test]
    fn test_type_tag_parse() {
        assert_eq!("Boolean".parse::<TypeTag>().unwrap(), TypeTag::Boolean);
        assert_eq!(
            "Array[Time]".parse::<TypeTag>().unwrap(),
            TypeTag::Array(ScalarType::Time)
        );
        assert!("Array[Array[String]]".parse::<TypeTag>().is_err());
        assert!("PrimaryKey".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_element_type() {
        assert_eq!(TypeTag::String.element(), ScalarType::String);
        assert_eq!(
            TypeTag::Array(ScalarType::Integer).element(),
            ScalarType::Integer
        );
        assert!(TypeTag::Array(ScalarType::String).is_array());
        assert!(!TypeTag::String.is_array());
    }

    #[test]
    fn test_field_def_serialization() {
        let field = FieldDef::new("tags", TypeTag::Array(ScalarType::String));
        let json = serde_json::to_value(field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "tags", "type": "Array[String]", "primary_key": false})
        );
    }
}
