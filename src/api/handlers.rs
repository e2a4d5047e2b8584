//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. The HTTP layer is a
//! thin consumer of the cache's public contract: it maps outcomes to status
//! codes and never reaches into shard internals.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::ShardedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{DeleteResponse, FlushResponse, GetResponse, HealthResponse, SetRequest, SetResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The sharded cache; internally synchronized, so handlers call it directly
    pub cache: Arc<ShardedCache>,
}

impl AppState {
    /// Creates a new AppState wrapping the given cache.
    pub fn new(cache: ShardedCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ShardedCache::from_config(config))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL (seconds).
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match req.ttl {
        Some(secs) => state
            .cache
            .set_with_ttl(req.key.clone(), req.value, Duration::from_secs(secs)),
        None => state.cache.set(req.key.clone(), req.value),
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. Responds 404 when the key is
/// absent or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache. Always responds 200: deleting an absent key
/// is a no-op, not an error.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.delete(&key);

    Json(DeleteResponse::new(key))
}

/// Handler for POST /flush
///
/// Clears every entry in the cache.
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    state.cache.flush();

    Json(FlushResponse::new())
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(
        state.cache.shard_count(),
        state.cache.entry_count(),
    ))
}
