//! Indexed Store
//!
//! In-memory tables for every record type:
//!
//! - **record**: `Record`, the raw input row
//! - **index**: `IndexPath`, `Bucket` and `FieldIndex` (inverted index)
//! - **table**: one primary table + per-field indexes
//!
//! # Architecture
//!
//! ```text
//! Store
//!  └─ users ─┬─ records: 1 → {...}, 2 → {...}
//!            └─ indexes: organization_id ─┬─ 101 → [1]
//!                                         └─ ""  → [2]
//!                        created_at ─── (2016,4,15,15,19,46) → [1, 2]
//! ```
//!
//! The store only holds data. Schema checks and normalization belong to
//! the ingestion pipeline; once built, the store is read-only.

mod index;
mod record;
mod table;

pub use index::{Bucket, FieldIndex, IndexPath};
pub use record::Record;
pub use table::Table;

use crate::normalize::Key;
use crate::schema::RecordType;
use std::collections::HashMap;
use std::fmt;

/// Primary tables and secondary indexes for all record types
#[derive(Debug, Default)]
pub struct Store {
    tables: HashMap<RecordType, Table>,
    /// Record types in the order their tables were created
    order: Vec<RecordType>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table for a record type (no-op if it exists)
    pub fn create_table(&mut self, record_type: RecordType) -> &mut Table {
        if !self.tables.contains_key(&record_type) {
            self.order.push(record_type);
        }
        self.tables.entry(record_type).or_default()
    }

    /// Replace the record stored at `key`.
    ///
    /// Index entries of the replaced record are left in place.
    pub fn upsert_record(
        &mut self,
        record_type: RecordType,
        key: Key,
        record: Record,
    ) -> Option<Record> {
        self.create_table(record_type).upsert(key, record)
    }

    /// Add `reference` to the bucket at `path`; returns false if already there
    pub fn insert_index_entry(
        &mut self,
        record_type: RecordType,
        path: &IndexPath,
        reference: Key,
    ) -> bool {
        self.create_table(record_type).index(path, reference)
    }

    pub fn get_record(&self, record_type: RecordType, key: &Key) -> Option<&Record> {
        self.tables.get(&record_type).and_then(|table| table.get(key))
    }

    /// Refs stored at `path`, empty when the path does not exist
    pub fn lookup_index(&self, record_type: RecordType, path: &IndexPath) -> &[Key] {
        self.tables
            .get(&record_type)
            .map(|table| table.lookup(path))
            .unwrap_or(&[])
    }

    /// Refs of a field whose keys fall within `[from, to]`, in key order
    pub fn lookup_range(
        &self,
        record_type: RecordType,
        field: &str,
        from: &Key,
        to: &Key,
    ) -> Vec<Key> {
        self.tables
            .get(&record_type)
            .and_then(|table| table.field_index(field))
            .map(|index| index.find_range(from, to))
            .unwrap_or_default()
    }

    /// Record types that have a table, in creation order
    pub fn record_types(&self) -> &[RecordType] {
        &self.order
    }

    pub fn table(&self, record_type: RecordType) -> Option<&Table> {
        self.tables.get(&record_type)
    }

    pub fn record_count(&self, record_type: RecordType) -> usize {
        self.tables.get(&record_type).map_or(0, Table::len)
    }

    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            tables: self.tables.len(),
            ..StoreStats::default()
        };

        for table in self.tables.values() {
            stats.records += table.len();
            for index in table.indexes() {
                stats.indexed_fields += 1;
                stats.buckets += index.bucket_count();
                stats.refs += index.ref_count();
            }
        }

        stats
    }
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub tables: usize,
    pub records: usize,
    pub indexed_fields: usize,
    pub buckets: usize,
    pub refs: usize,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tables: {}, Records: {}, Indexed fields: {}, Buckets: {}, Refs: {}",
            self.tables, self.records, self.indexed_fields, self.buckets, self.refs
        )
    }
}
