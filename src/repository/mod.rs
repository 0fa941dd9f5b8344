//! Repository / Join Layer
//!
//! Field search over a built [`Store`], plus association resolution that
//! expands each hit into a denormalized view:
//!
//! ```text
//! search(users, organization_id, 101)
//!        ↓  normalize → Key::Integer(101)
//! index: users.organization_id[101] → [1]
//!        ↓  get_record
//! [user 1]
//!        ↓  resolve
//! UserView { submitted_tickets, assigned_tickets, organization }
//! ```
//!
//! The repository holds the store behind an `Arc`; clones are cheap
//! read-only handles that can be shared across threads.

mod associations;
mod error;

#[cfg(test)]
pub(crate) mod fixtures;

pub use associations::{OrganizationView, Resolved, TicketView, UserView};
pub use error::{SearchError, SearchResult};

use crate::normalize::{normalize_query, Key, Rejected};
use crate::schema::{FieldDef, RecordType, ScalarType, Schema};
use crate::store::{IndexPath, Record, Store};
use serde_json::Value;
use std::sync::Arc;

/// Read-only query interface over a built store
#[derive(Debug, Clone)]
pub struct Repository {
    store: Arc<Store>,
}

impl Repository {
    pub fn new(store: Store) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Record types that were loaded, in load order
    pub fn available_record_types(&self) -> &[RecordType] {
        self.store.record_types()
    }

    /// Parse a record type name
    pub fn record_type(&self, name: &str) -> SearchResult<RecordType> {
        Ok(name.parse()?)
    }

    /// Searchable fields of a record type, in schema order
    pub fn fields_for(&self, record_type: RecordType) -> &'static [FieldDef] {
        Schema::of(record_type).fields()
    }

    /// Check that `term` names a field of the record type
    pub fn validate_search_term(
        &self,
        record_type: RecordType,
        term: &str,
    ) -> SearchResult<&'static FieldDef> {
        Schema::of(record_type)
            .field(term)
            .ok_or_else(|| SearchError::UnknownSearchTerm {
                record_type,
                term: term.to_string(),
            })
    }

    /// Find records whose `term` field matches `raw`.
    ///
    /// Primary-key searches return at most one record; other fields return
    /// matches in index insertion order.
    pub fn search(
        &self,
        record_type: RecordType,
        term: &str,
        raw: &Value,
    ) -> SearchResult<Vec<Record>> {
        let field = self.validate_search_term(record_type, term)?;
        let key = normalize_query(field.type_tag, raw).map_err(|source| invalid(term, source))?;

        let records = if field.primary_key {
            self.store
                .get_record(record_type, &key)
                .cloned()
                .into_iter()
                .collect()
        } else {
            let refs = self
                .store
                .lookup_index(record_type, &IndexPath::new(term, key));
            self.materialize(record_type, refs)
        };

        tracing::debug!(
            record_type = %record_type,
            term,
            value = %raw,
            matches = records.len(),
            "Search"
        );

        Ok(records)
    }

    /// Search and expand every hit with its associated records
    pub fn search_resolved(
        &self,
        record_type: RecordType,
        term: &str,
        raw: &Value,
    ) -> SearchResult<Vec<Resolved>> {
        self.search(record_type, term, raw)?
            .into_iter()
            .map(|record| self.resolve(record_type, record))
            .collect()
    }

    /// Records whose timestamp field lies within `[from, to]`, oldest first
    pub fn search_range(
        &self,
        record_type: RecordType,
        term: &str,
        from: &Value,
        to: &Value,
    ) -> SearchResult<Vec<Record>> {
        let field = self.validate_search_term(record_type, term)?;
        if field.primary_key || field.type_tag.element() != ScalarType::Time {
            return Err(SearchError::UnsupportedRange {
                field: term.to_string(),
                type_tag: field.type_tag,
            });
        }

        let bound = |raw: &Value| match normalize_query(field.type_tag, raw) {
            Ok(key @ Key::Time(_)) => Ok(key),
            Ok(_) => Err(invalid(term, Rejected::new(Some(field.type_tag), raw))),
            Err(source) => Err(invalid(term, source)),
        };
        let (from, to) = (bound(from)?, bound(to)?);

        let refs = self.store.lookup_range(record_type, term, &from, &to);
        Ok(self.materialize(record_type, &refs))
    }

    fn materialize(&self, record_type: RecordType, refs: &[Key]) -> Vec<Record> {
        refs.iter()
            .filter_map(|reference| self.store.get_record(record_type, reference))
            .cloned()
            .collect()
    }
}

fn invalid(term: &str, source: Rejected) -> SearchError {
    SearchError::InvalidSearchValue {
        field: term.to_string(),
        source,
    }
}
