//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Handlers are generic
//! over the [`Cache`] implementation so any eviction policy can be served.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::{Cache, CacheEntry};
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, SetItemRequest, StatsResponse};

/// Plain-text body served at the root path.
pub const BANNER: &str = "lrukv - (LRU/TTL Key-Value Store)";

/// Cache entries as exchanged over HTTP.
pub type Item = CacheEntry<String, Value>;

/// Application state shared across all handlers.
pub struct AppState<C> {
    pub cache: Arc<C>,
}

impl<C> AppState<C> {
    /// Creates a new AppState owning the given cache.
    pub fn new(cache: C) -> Self {
        Self::from_shared(Arc::new(cache))
    }

    /// Creates a new AppState around a cache shared with the caller.
    pub fn from_shared(cache: Arc<C>) -> Self {
        Self { cache }
    }
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Handler for GET /
pub async fn index_handler() -> &'static str {
    BANNER
}

/// Handler for GET /cache/items/:key
///
/// Returns the entry, or 404 if the key is absent or expired.
pub async fn get_item_handler<C: Cache<String, Value>>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<Item>> {
    let item = state.cache.get(&key).await?;
    Ok(Json(item))
}

/// Handler for GET /cache/items/
pub async fn get_all_items_handler<C: Cache<String, Value>>(
    State(state): State<AppState<C>>,
) -> Json<Vec<Item>> {
    Json(state.cache.get_all().await)
}

/// Handler for POST /cache/items
///
/// Stores the item with the TTL given in the body.
pub async fn set_item_handler<C: Cache<String, Value>>(
    State(state): State<AppState<C>>,
    Json(req): Json<SetItemRequest>,
) -> Result<StatusCode> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    debug!("Setting key {} with ttl {}s", req.key, ttl.as_secs());
    state.cache.set_with_expiry(req.key, req.value, ttl).await;

    Ok(StatusCode::OK)
}

/// Handler for DELETE /cache/items/:key
pub async fn delete_item_handler<C: Cache<String, Value>>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    state.cache.delete(&key).await?;
    Ok(StatusCode::OK)
}

/// Handler for DELETE /cache/items/
pub async fn purge_handler<C: Cache<String, Value>>(
    State(state): State<AppState<C>>,
) -> StatusCode {
    state.cache.purge().await;
    StatusCode::OK
}

/// Handler for GET /cache/stats
pub async fn stats_handler<C: Cache<String, Value>>(
    State(state): State<AppState<C>>,
) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
