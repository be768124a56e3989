//! LRU Cache Engine Module
//!
//! Combines the entry store with the recency list behind a single lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use generational_arena::Index;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{
    Cache, CacheConfig, CacheEntry, CacheKey, CacheStats, CacheValue, RecencyList,
};
use crate::error::{CacheError, Result};
use crate::tasks::SweepHandle;

// == LRU State ==
/// Entry store and recency list for an LRU cache.
///
/// Methods here never lock. The owning [`LruCache`] holds the lock for the
/// whole of each public operation and calls into this type, so expiry checks
/// and evictions run inside that one critical section.
#[derive(Debug)]
pub(crate) struct LruState<K, V> {
    capacity: usize,
    /// Key to node position in `list`
    store: HashMap<K, Index>,
    list: RecencyList<K, V>,
    stats: CacheStats,
}

impl<K: CacheKey, V: CacheValue> LruState<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            store: HashMap::new(),
            list: RecencyList::new(),
            stats: CacheStats::new(),
        }
    }

    // == Lookup ==
    /// Returns a copy of a live entry and moves it to the front.
    ///
    /// An expired entry is removed and reported as a miss.
    pub(crate) fn lookup(&mut self, key: &K, now: DateTime<Utc>) -> Option<CacheEntry<K, V>> {
        let Some(&index) = self.store.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self
            .list
            .get(index)
            .map_or(true, |entry| entry.is_expired_at(now));
        if expired {
            self.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.list.move_to_front(index);
        self.stats.record_hit();
        self.list.get(index).cloned()
    }

    // == Insert ==
    /// Writes an entry as most recently used.
    ///
    /// Overwriting an existing key never grows the store. A new key that
    /// pushes the store past capacity evicts from the back until the bound
    /// holds again. Returns the number of entries evicted.
    pub(crate) fn insert(&mut self, key: K, value: V, ttl: Duration, now: DateTime<Utc>) -> usize {
        if let Some(&index) = self.store.get(&key) {
            if let Some(entry) = self.list.get_mut(index) {
                entry.overwrite(value, ttl, now);
            }
            self.list.move_to_front(index);
            return 0;
        }

        let index = self.list.push_front(CacheEntry::new(key.clone(), value, ttl, now));
        self.store.insert(key, index);

        let overflow = self.store.len().saturating_sub(self.capacity);
        self.evict_n(overflow)
    }

    // == Remove ==
    pub(crate) fn remove(&mut self, key: &K) -> Option<CacheEntry<K, V>> {
        let index = self.store.remove(key)?;
        self.list.remove(index)
    }

    // == Evict N ==
    /// Removes up to `n` least recently used entries.
    pub(crate) fn evict_n(&mut self, n: usize) -> usize {
        let mut evicted = 0;
        while evicted < n {
            let Some(entry) = self.list.pop_back() else {
                break;
            };
            self.store.remove(&entry.key);
            debug!("Evicted least recently used key {}", entry.key);
            evicted += 1;
        }
        self.stats.record_evictions(evicted);
        evicted
    }

    // == Evict Expired ==
    /// Removes every entry expired at `now`, leaving the order of the
    /// remaining entries untouched.
    pub(crate) fn evict_expired(&mut self, now: DateTime<Utc>) -> usize {
        let expired: Vec<Index> = self
            .list
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(index, _)| index)
            .collect();

        let count = expired.len();
        for index in expired {
            if let Some(entry) = self.list.remove(index) {
                self.store.remove(&entry.key);
            }
        }

        self.stats.record_expirations(count);
        count
    }

    // == Live Entries ==
    /// Copies every entry not expired at `now`, most recently used first.
    pub(crate) fn live_entries(&self, now: DateTime<Utc>) -> Vec<CacheEntry<K, V>> {
        self.list
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    pub(crate) fn contains_live(&self, key: &K, now: DateTime<Utc>) -> bool {
        self.store
            .get(key)
            .and_then(|&index| self.list.get(index))
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    pub(crate) fn purge(&mut self) {
        self.store.clear();
        self.list.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.store.len()
    }

    /// Length of the recency list; always equal to [`LruState::len`].
    pub(crate) fn list_len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.store.len();
        stats
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.list.iter().map(|(_, entry)| entry.key.clone()).collect()
    }
}

// == LRU Cache ==
/// Bounded LRU cache with optional per-entry TTL.
///
/// A positive sweep interval in the configuration starts one background task
/// that evicts expired entries on every tick. The task stops when the cache is
/// dropped or [`LruCache::shutdown`] is called.
#[derive(Debug)]
pub struct LruCache<K, V> {
    config: CacheConfig,
    state: Arc<RwLock<LruState<K, V>>>,
    sweeper: Option<SweepHandle>,
}

impl<K: CacheKey, V: CacheValue> LruCache<K, V> {
    // == Constructor ==
    /// Builds an engine from a validated configuration.
    ///
    /// # Panics
    /// Panics if sweeping is enabled and no Tokio runtime is running, since
    /// the sweep task is spawned onto the current runtime.
    pub fn new(config: CacheConfig) -> Self {
        let state = Arc::new(RwLock::new(LruState::new(config.capacity())));

        let sweeper = config
            .sweep_enabled()
            .then(|| SweepHandle::spawn(Arc::clone(&state), config.sweep_interval()));

        info!(
            "LRU cache created: capacity={}, sweep_interval={}s",
            config.capacity(),
            config.sweep_interval().as_secs()
        );

        Self {
            config,
            state,
            sweeper,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns true while the background sweep task is alive.
    pub fn sweep_running(&self) -> bool {
        self.sweeper
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }

    // == Sweep Expired ==
    /// Runs one sweep pass immediately, returning the number of entries removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut state = self.state.write().await;
        state.evict_expired(Utc::now())
    }

    // == Shutdown ==
    /// Stops the background sweep task and waits for it to exit.
    pub async fn shutdown(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.stop().await;
        }
    }

    /// Checks that the store and the recency list agree on size.
    pub async fn is_consistent(&self) -> bool {
        let state = self.state.read().await;
        state.len() == state.list_len()
    }
}

impl<K: CacheKey, V: CacheValue> Cache<K, V> for LruCache<K, V> {
    async fn get(&self, key: &K) -> Result<CacheEntry<K, V>> {
        let mut state = self.state.write().await;
        state
            .lookup(key, Utc::now())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    async fn get_all(&self) -> Vec<CacheEntry<K, V>> {
        let state = self.state.read().await;
        state.live_entries(Utc::now())
    }

    async fn set_with_expiry(&self, key: K, value: V, ttl: Duration) {
        let mut state = self.state.write().await;
        state.insert(key, value, ttl, Utc::now());
    }

    async fn delete(&self, key: &K) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    async fn purge(&self) {
        let mut state = self.state.write().await;
        state.purge();
        info!("Cache purged");
    }

    async fn evict_n(&self, n: usize) -> usize {
        let mut state = self.state.write().await;
        state.evict_n(n)
    }

    async fn contains(&self, key: &K) -> bool {
        let state = self.state.read().await;
        state.contains_live(key, Utc::now())
    }

    async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    async fn stats(&self) -> CacheStats {
        self.state.read().await.stats()
    }
}
