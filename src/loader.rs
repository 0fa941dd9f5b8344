//! Data file loading
//!
//! Reads the three JSON collections from disk into a [`Batch`] and builds
//! a [`Repository`] from it.

use crate::ingest::{build, Batch, IngestError};
use crate::repository::Repository;
use crate::schema::RecordType;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading data files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read data file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse data file {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Data file {path:?} does not contain a JSON array")]
    NotAnArray { path: PathBuf },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Locations of the collection files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub users: PathBuf,
    pub organizations: PathBuf,
    pub tickets: PathBuf,
}

impl DataPaths {
    /// `users.json`, `organizations.json` and `tickets.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            users: dir.join("users.json"),
            organizations: dir.join("organizations.json"),
            tickets: dir.join("tickets.json"),
        }
    }

    /// Files in load order, paired with their record type
    pub fn iter(&self) -> impl Iterator<Item = (RecordType, &Path)> {
        [
            (RecordType::Users, self.users.as_path()),
            (RecordType::Organizations, self.organizations.as_path()),
            (RecordType::Tickets, self.tickets.as_path()),
        ]
        .into_iter()
    }
}

/// Read every collection file into a batch
pub fn load_batch(paths: &DataPaths) -> LoadResult<Batch> {
    let mut batch = Batch::new();

    for (record_type, path) in paths.iter() {
        let rows = read_collection(path)?;
        tracing::debug!(record_type = %record_type, rows = rows.len(), "Read {:?}", path);
        batch.push(record_type.as_str(), rows);
    }

    Ok(batch)
}

/// Parse the contents of one collection file
pub fn parse_collection(path: &Path, content: &str) -> LoadResult<Vec<Value>> {
    let value: Value = serde_json::from_str(content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(rows) => Ok(rows),
        _ => Err(LoadError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

fn read_collection(path: &Path) -> LoadResult<Vec<Value>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_collection(path, &content)
}

/// Load the collection files and build a repository
pub fn open_repository(paths: &DataPaths) -> LoadResult<Repository> {
    let batch = load_batch(paths)?;
    let store = build(&batch)?;
    tracing::info!("Loaded {} rows from {} collections", batch.row_count(), batch.len());
    Ok(Repository::new(store))
}
