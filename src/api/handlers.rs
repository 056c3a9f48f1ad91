//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Handlers only
//! translate between HTTP and [`SharedCache`] calls.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, PutRequest, PutResponse, StatsResponse,
};
use crate::persistence::SnapshotFile;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache instance owned by this server
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around an in-memory store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            cache: SharedCache::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Loads the snapshot when `data_file` is configured.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let cache = match &config.data_file {
            Some(path) => SharedCache::open(config.max_capacity, SnapshotFile::new(path)).await?,
            None => SharedCache::new(CacheStore::new(config.max_capacity)),
        };

        Ok(Self { cache })
    }
}

/// Handler for POST /cache
///
/// Stores a new key-value pair; existing keys are rejected, not overwritten.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<(StatusCode, Json<PutResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    state.cache.put(req.key.clone(), req.value).await?;

    Ok((StatusCode::CREATED, Json(PutResponse::new(req.key))))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get(&key).await?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.delete(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns occupancy and operation counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
