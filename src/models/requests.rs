//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Request body for storing an item (POST /cache/items)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: TTL in seconds, 0 or absent means no expiration
#[derive(Debug, Clone, Deserialize)]
pub struct SetItemRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: u64,
}

impl SetItemRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}
