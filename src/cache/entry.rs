//! Cache Entry Module
//!
//! Defines the key-value pair held by the store.

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A single live key-value pair.
///
/// Entries are never mutated in place: a `put` on an existing key is
/// rejected, so an entry lives unchanged until it is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Unique key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
