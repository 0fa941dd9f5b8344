//! # desksearch
//!
//! Help-desk search: an in-memory indexed store over users, organizations
//! and tickets, with field search and cross-entity joins.
//!
//! ## Features
//!
//! - **Typed schema**: fixed field tables per record type
//! - **Normalized keys**: case-insensitive strings, UTC timestamps, `""` for missing
//! - **Inverted indexes**: every field of every record, arrays fanned out
//! - **Joins**: users ↔ tickets ↔ organizations resolved at query time
//!
//! ## Modules
//!
//! - [`schema`]: Record types and field definitions
//! - [`normalize`]: Raw JSON values to index keys
//! - [`store`]: Primary tables and field indexes
//! - [`ingest`]: Validating build pipeline
//! - [`repository`]: Search and association resolution
//! - [`loader`]: Data files to repository
//! - [`shell`]: Interactive search prompt
//!
//! ## Quick Start
//!
//! ```rust
//! use desksearch::{build, Batch, RecordType, Repository};
//! use serde_json::json;
//!
//! let batch = Batch::new()
//!     .with(
//!         "users",
//!         vec![json!({"_id": 1, "name": "Francisca Rasmussen", "organization_id": 101})],
//!     )
//!     .with("organizations", vec![json!({"_id": 101, "name": "Enthaze"})])
//!     .with("tickets", vec![]);
//!
//! let repo = Repository::new(build(&batch)?);
//!
//! let users = repo.search(RecordType::Users, "name", &json!("FRANCISCA rasmussen"))?;
//! assert_eq!(users.len(), 1);
//!
//! let orgs = repo.search_resolved(RecordType::Organizations, "_id", &json!(101))?;
//! assert_eq!(orgs[0].record().get("name"), Some(&json!("Enthaze")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod ingest;
pub mod loader;
pub mod normalize;
pub mod repository;
pub mod schema;
pub mod shell;
pub mod store;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, DataConfig, LoggingConfig};

pub use ingest::{build, Batch, IngestError, IngestResult};

pub use loader::{load_batch, open_repository, DataPaths, LoadError};

pub use normalize::{normalize, Key, Normalized, Rejected, TimeParts};

pub use repository::{
    OrganizationView, Repository, Resolved, SearchError, SearchResult, TicketView, UserView,
};

pub use schema::{FieldDef, RecordType, ScalarType, Schema, TypeTag, UnknownRecordType};

pub use shell::Shell;

pub use store::{IndexPath, Record, Store, StoreStats};
