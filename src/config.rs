//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::cache::DEFAULT_MAX_CAPACITY;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Snapshot file backing the cache, in-memory only when unset
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CAPACITY` - Maximum cache entries (default: 10)
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `CACHE_DATA_FILE` - Snapshot path (default: unset, no persistence)
    pub fn from_env() -> Self {
        Self {
            max_capacity: parse_var("MAX_CAPACITY", DEFAULT_MAX_CAPACITY),
            server_port: parse_var("PORT", DEFAULT_PORT),
            data_file: env::var_os("CACHE_DATA_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            server_port: DEFAULT_PORT,
            data_file: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
