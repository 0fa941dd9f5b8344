//! Ingestion Pipeline
//!
//! Validates raw rows against the schema and loads them into a fresh
//! [`Store`]. The build is all-or-nothing: the first bad row aborts it.
//!
//! # Build Path
//!
//! ```text
//! Batch → per collection: resolve schema
//!       → per row: check attributes → primary key → normalize fields
//!       → upsert raw row → insert (field, key) → primary key
//! ```

mod error;

pub use error::{IngestError, IngestResult};

use crate::normalize::{normalize_field, Rejected};
use crate::schema::{RecordType, Schema};
use crate::store::{IndexPath, Record, Store};
use serde_json::Value;

/// Raw input: collections of rows keyed by record type name, in load order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    collections: Vec<(String, Vec<Value>)>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a collection
    pub fn with(mut self, record_type: impl Into<String>, rows: Vec<Value>) -> Self {
        self.push(record_type, rows);
        self
    }

    pub fn push(&mut self, record_type: impl Into<String>, rows: Vec<Value>) {
        self.collections.push((record_type.into(), rows));
    }

    /// Read a `{"users": [...], "organizations": [...], ...}` object
    pub fn from_value(value: Value) -> IngestResult<Self> {
        let collections = match value {
            Value::Object(map) => map,
            other => return Err(IngestError::MalformedCollection(other.to_string())),
        };

        let mut batch = Self::new();
        for (name, rows) in collections {
            match rows {
                Value::Array(rows) => batch.push(name, rows),
                _ => return Err(IngestError::MalformedCollection(name)),
            }
        }
        Ok(batch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.collections
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }

    /// Number of collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total rows across collections
    pub fn row_count(&self) -> usize {
        self.collections.iter().map(|(_, rows)| rows.len()).sum()
    }
}

/// Build a store from a batch
pub fn build(batch: &Batch) -> IngestResult<Store> {
    let mut store = Store::new();

    for (name, rows) in batch.iter() {
        let record_type: RecordType = name.parse()?;
        let schema = Schema::of(record_type);
        store.create_table(record_type);

        for (position, row) in rows.iter().enumerate() {
            ingest_row(&mut store, &schema, position, row)?;
        }

        tracing::debug!(
            record_type = %record_type,
            rows = rows.len(),
            records = store.record_count(record_type),
            "Ingested collection"
        );
    }

    tracing::info!("Built store: {}", store.stats());
    Ok(store)
}

fn ingest_row(
    store: &mut Store,
    schema: &Schema,
    position: usize,
    row: &Value,
) -> IngestResult<()> {
    let record_type = schema.record_type();

    let fields = row.as_object().ok_or(IngestError::MalformedRow {
        record_type,
        position,
    })?;

    let unknown: Vec<String> = fields
        .keys()
        .filter(|name| schema.field(name).is_none())
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(IngestError::UnknownAttribute {
            record_type,
            position,
            attributes: unknown,
        });
    }

    let primary = schema.primary_key();
    let raw_key = match fields.get(primary.name) {
        None | Some(Value::Null) => {
            return Err(IngestError::MissingPrimaryKey {
                record_type,
                position,
                field: primary.name.to_string(),
            })
        }
        Some(raw) => raw,
    };

    let invalid = |field: &str, source: Rejected| IngestError::InvalidValue {
        record_type,
        position,
        field: field.to_string(),
        source,
    };

    let key = normalize_field(Some(primary), raw_key)
        .map_err(|source| invalid(primary.name, source))?
        .into_scalar()
        .ok_or_else(|| invalid(primary.name, Rejected::new(Some(primary.type_tag), raw_key)))?;

    let record = Record::new(fields.clone());

    let mut paths = Vec::new();
    for field in schema.indexed_fields() {
        let normalized = normalize_field(Some(field), record.value_or_blank(field.name))
            .map_err(|source| invalid(field.name, source))?;
        paths.extend(
            normalized
                .into_keys()
                .into_iter()
                .map(|component| IndexPath::new(field.name, component)),
        );
    }

    if store.upsert_record(record_type, key.clone(), record).is_some() {
        tracing::warn!(
            record_type = %record_type,
            position,
            "Duplicate primary key {}, later row replaces earlier one",
            key
        );
    }

    for path in &paths {
        store.insert_index_entry(record_type, path, key.clone());
    }

    Ok(())
}
