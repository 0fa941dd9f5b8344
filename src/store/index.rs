//! Inverted index for one field
//!
//! Maps a normalized key → ordered list of primary keys ("refs") whose
//! record produced that key.
//!
//! # Example
//! ```ignore
//! // Query: tickets where tags contains "ohio"
//! let refs = index.find(&Key::from("ohio"));
//! // refs = [Text("436bf9b0-..."), Text("9s8df9b0-...")]
//! ```
//!
//! # Design Notes
//! - Buckets keep first-insertion order
//! - Deduplicates refs automatically
//! - Keys are kept sorted so range scans (time fields) are cheap

use crate::normalize::Key;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Location of a bucket: field name plus normalized key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexPath {
    pub field: String,
    pub key: Key,
}

impl IndexPath {
    pub fn new(field: impl Into<String>, key: Key) -> Self {
        Self {
            field: field.into(),
            key,
        }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.field, self.key)
    }
}

/// Ordered, duplicate-free list of refs
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    refs: Vec<Key>,
    seen: HashSet<Key>,
}

impl Bucket {
    /// Append a ref; returns false if it was already present
    pub fn insert(&mut self, reference: Key) -> bool {
        if self.seen.contains(&reference) {
            return false;
        }

        self.seen.insert(reference.clone());
        self.refs.push(reference);
        true
    }

    pub fn refs(&self) -> &[Key] {
        &self.refs
    }

    pub fn contains(&self, reference: &Key) -> bool {
        self.seen.contains(reference)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// Inverted index over the values of a single field
#[derive(Debug, Default)]
pub struct FieldIndex {
    buckets: BTreeMap<Key, Bucket>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ref under a key
    pub fn insert(&mut self, key: Key, reference: Key) -> bool {
        self.buckets.entry(key).or_default().insert(reference)
    }

    /// Refs stored under exactly this key
    pub fn find(&self, key: &Key) -> &[Key] {
        self.buckets
            .get(key)
            .map(|bucket| bucket.refs())
            .unwrap_or(&[])
    }

    /// Refs of every bucket with a key in `[from, to]`, in key order.
    ///
    /// A ref appearing under several keys is returned once, at its first
    /// position.
    pub fn find_range(&self, from: &Key, to: &Key) -> Vec<Key> {
        if from > to {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        self.buckets
            .range(from.clone()..=to.clone())
            .flat_map(|(_, bucket)| bucket.refs())
            .filter(|reference| seen.insert(*reference))
            .cloned()
            .collect()
    }

    /// All distinct keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.buckets.keys()
    }

    /// Number of distinct keys
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total refs across buckets (a record counts once per key it produced)
    pub fn ref_count(&self) -> usize {
        self.buckets.values().map(Bucket::len).sum()
    }
}
