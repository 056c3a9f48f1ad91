//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Error kinds reported by the bounded cache.
///
/// Every variant is terminal for the failed operation; the store never
/// retries and never leaves a partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Empty, oversized or otherwise unusable key or value
    #[error("{0}")]
    InvalidArgument(String),

    /// A live entry already uses this key
    #[error("Key already exists in cache.")]
    DuplicateKey(String),

    /// The store already holds its maximum number of entries
    #[error("Cache is full. Cannot store more items.")]
    CapacityExceeded(usize),

    /// No live entry has this key
    #[error("Key not found in cache.")]
    NotFound(String),

    /// The backing storage could not be reached
    #[error("Backing storage unavailable: {0}")]
    Unavailable(String),
}

impl CacheError {
    /// HTTP status this error kind maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::InvalidArgument(_)
            | CacheError::DuplicateKey(_)
            | CacheError::CapacityExceeded(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let CacheError::Unavailable(reason) = &self {
            warn!("Request failed, backing storage unavailable: {}", reason);
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
