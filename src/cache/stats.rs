//! Cache Statistics Module
//!
//! Tracks lookup hits and misses and the reasons `put` calls were rejected.

use std::sync::atomic::{AtomicU64, Ordering};

// == Cache Stats ==
/// Operation counters for the store.
///
/// Counters are atomic so lookups can record hits and misses while holding
/// only a shared borrow of the store.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    rejected_full: AtomicU64,
    rejected_duplicate: AtomicU64,
}

/// Point-in-time copy of the counters together with occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSnapshot {
    /// Number of live entries
    pub count: usize,
    /// Maximum number of live entries
    pub capacity: usize,
    /// Successful lookups
    pub hits: u64,
    /// Lookups for absent keys
    pub misses: u64,
    /// `put` calls rejected because the store was full
    pub rejected_full: u64,
    /// `put` calls rejected because the key was already present
    pub rejected_duplicate: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_full(&self) {
        self.rejected_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_duplicate(&self) {
        self.rejected_duplicate.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters, pairing them with the given occupancy figures.
    pub fn snapshot(&self, count: usize, capacity: usize) -> StatsSnapshot {
        StatsSnapshot {
            count,
            capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            rejected_full: self.rejected_full.load(Ordering::Relaxed),
            rejected_duplicate: self.rejected_duplicate.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
