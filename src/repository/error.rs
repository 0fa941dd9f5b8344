//! Search error types
//!
//! Query-time failures are recoverable: the caller can re-prompt, the
//! store is untouched.

use crate::normalize::Rejected;
use crate::schema::{RecordType, TypeTag, UnknownRecordType};
use thiserror::Error;

/// Errors that can occur during a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Record type name is not known
    #[error(transparent)]
    UnknownRecordType(#[from] UnknownRecordType),

    /// Field is not part of the record type's schema
    #[error("unknown search term '{term}' for the record {record_type}")]
    UnknownSearchTerm {
        record_type: RecordType,
        term: String,
    },

    /// Search value cannot be read as the field's type
    #[error("search value {} is invalid for '{field}' ({})", offending(.source), expected(.source))]
    InvalidSearchValue { field: String, source: Rejected },

    /// Range search requested on a field that is not an indexed timestamp
    #[error("range search needs a Time field, '{field}' is {type_tag}")]
    UnsupportedRange { field: String, type_tag: TypeTag },
}

fn offending(rejected: &Rejected) -> &serde_json::Value {
    &rejected.value
}

fn expected(rejected: &Rejected) -> String {
    match rejected.expected {
        Some(tag) => format!("expected {}", tag),
        None => "unknown field".to_string(),
    }
}

/// Result type alias for searches
pub type SearchResult<T> = Result<T, SearchError>;
