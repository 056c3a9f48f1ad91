//! Cache Module
//!
//! Provides the capacity-bounded in-memory store and its shared handle.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;

// == Public Constants ==
/// Default ceiling on the number of live entries
pub const DEFAULT_MAX_CAPACITY: usize = 10;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
