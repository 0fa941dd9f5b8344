//! Per-record-type table: primary rows plus one inverted index per field

use super::index::{FieldIndex, IndexPath};
use super::record::Record;
use crate::normalize::Key;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Table {
    /// primary key → raw row
    records: HashMap<Key, Record>,
    /// field name → index over that field's normalized values
    indexes: HashMap<String, FieldIndex>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row, returning the one it replaced
    pub fn upsert(&mut self, key: Key, record: Record) -> Option<Record> {
        self.records.insert(key, record)
    }

    pub fn get(&self, key: &Key) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn index(&mut self, path: &IndexPath, reference: Key) -> bool {
        self.indexes
            .entry(path.field.clone())
            .or_default()
            .insert(path.key.clone(), reference)
    }

    pub fn lookup(&self, path: &IndexPath) -> &[Key] {
        self.indexes
            .get(&path.field)
            .map(|index| index.find(&path.key))
            .unwrap_or(&[])
    }

    pub fn field_index(&self, field: &str) -> Option<&FieldIndex> {
        self.indexes.get(field)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(super) fn indexes(&self) -> impl Iterator<Item = &FieldIndex> {
        self.indexes.values()
    }
}
