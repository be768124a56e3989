//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Layout used when an expiration timestamp is rendered for clients.
pub const EXPIRATION_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

// == Cache Entry ==
/// A single cache entry with its value and expiry metadata.
///
/// A zero `ttl` means the entry never expires by time; `expires_at` is then
/// `None`. Capacity eviction still applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry<K, V> {
    pub key: K,
    pub value: V,
    /// Serialized as whole seconds
    #[serde(serialize_with = "serialize_ttl")]
    pub ttl: Duration,
    /// Serialized as a formatted string, empty when unset
    #[serde(rename = "ExpirationTime", serialize_with = "serialize_expiration")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an entry written at `now`.
    ///
    /// The expiration is only computed for a positive TTL. A TTL too large to
    /// represent as a timestamp leaves the expiration unset.
    pub fn new(key: K, value: V, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            ttl,
            expires_at: expiration_for(ttl, now),
        }
    }

    // == Overwrite ==
    /// Replaces value, TTL and expiration in place.
    pub fn overwrite(&mut self, value: V, ttl: Duration, now: DateTime<Utc>) {
        self.value = value;
        self.ttl = ttl;
        self.expires_at = expiration_for(ttl, now);
    }

    // == Is Expired ==
    /// Checks the entry against a given instant.
    ///
    /// True only when the TTL is positive and `now` is strictly past the
    /// expiration timestamp. Both the read path and the sweep use this.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.ttl.is_zero() {
            return false;
        }
        matches!(self.expires_at, Some(expires) if now > expires)
    }

    /// Checks the entry against the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

fn expiration_for(ttl: Duration, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if ttl.is_zero() {
        return None;
    }
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
}

fn serialize_ttl<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(ttl.as_secs())
}

fn serialize_expiration<S: Serializer>(
    expires_at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match expires_at {
        Some(at) => serializer.collect_str(&at.format(EXPIRATION_FORMAT)),
        None => serializer.serialize_str(""),
    }
}
