//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_item_handler, get_all_items_handler, get_item_handler, health_handler, index_handler,
    purge_handler, set_item_handler, stats_handler, AppState,
};
use crate::cache::Cache;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router<C: Cache<String, Value>>(state: AppState<C>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route(
            "/cache/items/",
            get(get_all_items_handler::<C>).delete(purge_handler::<C>),
        )
        .route("/cache/items", post(set_item_handler::<C>))
        .route(
            "/cache/items/:key",
            get(get_item_handler::<C>).delete(delete_item_handler::<C>),
        )
        .route("/cache/stats", get(stats_handler::<C>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
