//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /` - Service banner
//! - `GET /cache/items/:key` - Retrieve an item
//! - `GET /cache/items/` - Retrieve every live item
//! - `POST /cache/items` - Store an item
//! - `DELETE /cache/items/:key` - Delete an item
//! - `DELETE /cache/items/` - Purge the cache
//! - `GET /cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
