//! lrukv - An in-memory key-value cache server
//!
//! Bounded LRU cache with per-entry TTL expiration and an optional
//! background sweep, served over a small HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheConfig, CacheEntry, LruCache};
pub use config::{build_cache, Config};
