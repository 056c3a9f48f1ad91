//! Cache Store Module
//!
//! Bounded key-value storage: a hard ceiling on the number of live entries
//! and at most one entry per key.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Capacity-bounded cache storage.
///
/// `CacheStore` itself is not synchronized; `put` and `delete` take
/// `&mut self`, so wrapping it in a lock (see [`SharedCache`]) makes the
/// capacity check, duplicate check and insert one atomic admission decision.
///
/// [`SharedCache`]: crate::cache::SharedCache
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, String>,
    /// Operation counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store that admits at most `max_capacity` entries.
    pub fn new(max_capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_capacity),
            stats: CacheStats::new(),
            max_capacity,
        }
    }

    // == Put ==
    /// Inserts a new key-value pair.
    ///
    /// Checks run in order: argument validation, capacity, key uniqueness.
    /// A rejected call leaves the store unchanged.
    ///
    /// # Errors
    /// * `InvalidArgument` - empty or oversized key or value
    /// * `CapacityExceeded` - the store already holds `max_capacity` entries
    /// * `DuplicateKey` - a live entry already has this key
    pub fn put(&mut self, key: String, value: String) -> Result<()> {
        validate(&key, &value)?;

        if self.entries.len() >= self.max_capacity {
            self.stats.record_rejected_full();
            debug!("Rejected put for '{}': store is full", key);
            return Err(CacheError::CapacityExceeded(self.max_capacity));
        }

        if self.entries.contains_key(&key) {
            self.stats.record_rejected_duplicate();
            debug!("Rejected put for '{}': key already present", key);
            return Err(CacheError::DuplicateKey(key));
        }

        self.entries.insert(key, value);
        Ok(())
    }

    // == Get ==
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<String> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Ok(value.clone())
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Delete ==
    /// Removes the entry stored under `key`, freeing one capacity slot.
    ///
    /// Returns the removed entry.
    pub fn delete(&mut self, key: &str) -> Result<CacheEntry> {
        self.entries
            .remove_entry(key)
            .map(|(key, value)| CacheEntry { key, value })
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Count ==
    /// Returns the current number of live entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.max_capacity
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Entries ==
    /// Returns a copy of all live entries ordered by key.
    pub fn entries(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self
            .entries
            .iter()
            .map(|(key, value)| CacheEntry::new(key.as_str(), value.as_str()))
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    // == Stats ==
    /// Returns current counters and occupancy.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.entries.len(), self.max_capacity)
    }

    /// Puts back an entry removed by a `delete` whose effect is being undone.
    ///
    /// The slot it occupied is still free, so neither bound can be violated.
    pub(crate) fn restore(&mut self, entry: CacheEntry) {
        debug_assert!(self.entries.len() < self.max_capacity);
        self.entries.insert(entry.key, entry.value);
    }
}

// == Validation ==
fn validate(key: &str, value: &str) -> Result<()> {
    if key.is_empty() || value.is_empty() {
        return Err(CacheError::InvalidArgument(
            "Both key and value are required.".to_string(),
        ));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }

    if value.len() > MAX_VALUE_SIZE {
        return Err(CacheError::InvalidArgument(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }

    Ok(())
}
