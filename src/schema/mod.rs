//! Schema Registry
//!
//! Static field definitions for every record type:
//!
//! - **types**: `RecordType`, `TypeTag`, `ScalarType`, `FieldDef`
//! - **definitions**: the users / organizations / tickets field tables
//!
//! # Example
//!
//! ```rust
//! use desksearch::schema::{RecordType, Schema};
//!
//! let schema = Schema::of(RecordType::Tickets);
//! assert_eq!(schema.primary_key().name, "_id");
//! assert!(schema.field("submitter_id").is_some());
//! ```

mod definitions;
mod types;

pub use types::{FieldDef, RecordType, ScalarType, TypeTag};

use thiserror::Error;

/// Field names the join layer relies on
pub mod fields {
    pub const ID: &str = "_id";
    pub const ORGANIZATION_ID: &str = "organization_id";
    pub const SUBMITTER_ID: &str = "submitter_id";
    pub const ASSIGNEE_ID: &str = "assignee_id";
}

/// Raised when a record type name is not one of the known categories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown record type '{0}'")]
pub struct UnknownRecordType(pub String);

/// Schema of one record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    record_type: RecordType,
    fields: &'static [FieldDef],
}

impl Schema {
    /// Get the schema of a record type
    pub fn of(record_type: RecordType) -> Self {
        let fields = match record_type {
            RecordType::Users => definitions::USERS,
            RecordType::Organizations => definitions::ORGANIZATIONS,
            RecordType::Tickets => definitions::TICKETS,
        };

        Self {
            record_type,
            fields,
        }
    }

    /// Look up a schema by record type name
    pub fn lookup(name: &str) -> Result<Self, UnknownRecordType> {
        name.parse().map(Self::of)
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// All fields, in declaration order
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }

    /// The single primary-key field.
    ///
    /// The built-in tables declare exactly one; anything else is a broken
    /// schema table and panics.
    pub fn primary_key(&self) -> &'static FieldDef {
        let mut keys = self.fields.iter().filter(|field| field.primary_key);
        match (keys.next(), keys.next()) {
            (Some(key), None) => key,
            _ => panic!(
                "schema for {} must declare exactly one primary key",
                self.record_type
            ),
        }
    }

    /// Fields that get a secondary index (everything except the primary key)
    pub fn indexed_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|field| !field.primary_key)
    }
}

/// Ordered field definitions of a record type
pub fn fields_for(record_type: RecordType) -> &'static [FieldDef] {
    Schema::of(record_type).fields()
}

/// Primary-key field of a record type
pub fn primary_key_of(record_type: RecordType) -> &'static FieldDef {
    Schema::of(record_type).primary_key()
}
