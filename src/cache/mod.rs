//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod config;
mod engine;
mod entry;
mod list;
mod stats;


use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use crate::error::Result;

// Re-export public types
pub use config::{CacheConfig, MIN_SWEEP_INTERVAL};
pub use engine::LruCache;
pub(crate) use engine::LruState;
pub use entry::{CacheEntry, EXPIRATION_FORMAT};
pub(crate) use list::RecencyList;
pub use stats::CacheStats;

// == Bounds ==
/// Requirements on cache keys.
pub trait CacheKey: Eq + Hash + Clone + Display + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Eq + Hash + Clone + Display + Send + Sync + 'static {}

/// Requirements on cached values.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Clone + Send + Sync + 'static {}

// == Cache Capability ==
/// Operations every eviction policy exposes to callers.
///
/// Each call is atomic with respect to every other call on the same cache.
pub trait Cache<K: CacheKey, V: CacheValue>: Send + Sync + 'static {
    /// Returns a live entry and marks it most recently used.
    ///
    /// Absent and expired keys both yield [`CacheError::NotFound`].
    ///
    /// [`CacheError::NotFound`]: crate::error::CacheError::NotFound
    fn get(&self, key: &K) -> impl Future<Output = Result<CacheEntry<K, V>>> + Send;

    /// Returns every live entry without changing recency order.
    fn get_all(&self) -> impl Future<Output = Vec<CacheEntry<K, V>>> + Send;

    /// Stores a value that never expires by time.
    fn set(&self, key: K, value: V) -> impl Future<Output = ()> + Send {
        self.set_with_expiry(key, value, Duration::ZERO)
    }

    /// Stores a value with a TTL; a zero TTL never expires.
    fn set_with_expiry(&self, key: K, value: V, ttl: Duration)
        -> impl Future<Output = ()> + Send;

    fn delete(&self, key: &K) -> impl Future<Output = Result<()>> + Send;

    /// Removes every entry.
    fn purge(&self) -> impl Future<Output = ()> + Send;

    /// Evicts up to `n` entries by policy, returning how many were removed.
    fn evict_n(&self, n: usize) -> impl Future<Output = usize> + Send;

    /// Returns true for a present, live key without touching recency.
    fn contains(&self, key: &K) -> impl Future<Output = bool> + Send;

    /// Number of stored entries, including expired ones not yet removed.
    fn len(&self) -> impl Future<Output = usize> + Send;

    fn stats(&self) -> impl Future<Output = CacheStats> + Send;
}
