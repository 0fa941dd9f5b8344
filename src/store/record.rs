//! Stored record: the raw input row, unmodified

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static BLANK: Value = Value::String(String::new());

/// One row of a record type, field order preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Raw value of a field, with absent and `null` read as `""`
    pub fn value_or_blank(&self, field: &str) -> &Value {
        match self.0.get(field) {
            None | Some(Value::Null) => &BLANK,
            Some(value) => value,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
