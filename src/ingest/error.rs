//! Ingestion error types
//!
//! Every variant aborts the whole build; no partial store is returned.

use crate::normalize::Rejected;
use crate::schema::{RecordType, UnknownRecordType};
use thiserror::Error;

/// Errors that can occur while building the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// Collection name is not a known record type
    #[error(transparent)]
    UnknownRecordType(#[from] UnknownRecordType),

    /// Row carries keys that are not in the schema
    #[error("unknown attributes {attributes:?} in {record_type} row {position}")]
    UnknownAttribute {
        record_type: RecordType,
        position: usize,
        attributes: Vec<String>,
    },

    /// Primary-key field is absent or null
    #[error("primary key '{field}' is missing in {record_type} row {position}")]
    MissingPrimaryKey {
        record_type: RecordType,
        position: usize,
        field: String,
    },

    /// Field value does not match the field's type
    #[error("invalid value for '{field}' in {record_type} row {position}: {source}")]
    InvalidValue {
        record_type: RecordType,
        position: usize,
        field: String,
        source: Rejected,
    },

    /// Row is not a JSON object
    #[error("{record_type} row {position} is not an object")]
    MalformedRow {
        record_type: RecordType,
        position: usize,
    },

    /// Collection is not a JSON array of rows
    #[error("collection '{0}' is not an array")]
    MalformedCollection(String),
}

/// Result type alias for ingestion
pub type IngestResult<T> = Result<T, IngestError>;
