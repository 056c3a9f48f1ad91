//! Bounded Cache - A capacity-bounded key-value cache server
//!
//! Stores unique string keys up to a fixed number of entries and rejects
//! inserts once that ceiling is reached. Nothing is ever evicted.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;

pub use api::AppState;
pub use cache::SharedCache;
pub use config::Config;
pub use error::CacheError;
