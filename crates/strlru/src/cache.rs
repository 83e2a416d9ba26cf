//! LruCache: the thread-safe cache handle

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::lru::{Lru, Put};
use crate::stats::CacheStats;
use crate::Cacher;

/// Fixed-capacity LRU cache for string keys and values
///
/// Every operation, reads included, takes one exclusive lock for its whole
/// duration: a hit moves the key to the front of the recency list, so there
/// is no read-only path. Values are copied out; no reference into the cache
/// outlives the call that produced it.
///
/// Share between threads with `Arc<LruCache>`.
pub struct LruCache {
    /// Lookup index and recency list, guarded together
    inner: Mutex<Lru>,

    /// Cache statistics
    stats: CacheStats,
}

impl LruCache {
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// Any capacity is accepted. Zero yields a cache that never retains
    /// anything; storage for large capacities is allocated as entries arrive.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries before LRU eviction
    ///
    /// # Returns
    /// * `LruCache` - Empty cache handle
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "creating LRU cache");
        Self {
            inner: Mutex::new(Lru::new(capacity)),
            stats: CacheStats::new(),
        }
    }

    /// Create an empty cache from a [`CacheConfig`]
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Insert or overwrite `key`, making it the most recently used entry
    ///
    /// When the cache is full and `key` is new, the least recently used
    /// entry is evicted first.
    ///
    /// # Arguments
    /// * `key` - Key to insert or update
    /// * `value` - Value to associate with `key`
    ///
    /// # Returns
    /// * `bool` - Always `true`
    pub fn add(&self, key: &str, value: &str) -> bool {
        let mut inner = self.inner.lock();
        match inner.put(key, value) {
            Put::Updated => self.stats.record_update(),
            Put::Inserted => self.stats.record_insert(),
            Put::Evicted(evicted) => {
                trace!(key = %evicted, "evicted least recently used entry");
                self.stats.record_eviction();
                self.stats.record_insert();
            }
            Put::Dropped => trace!(key, "zero capacity, entry not retained"),
        }
        true
    }

    /// Look up `key`, promoting it to most recently used on a hit
    ///
    /// # Arguments
    /// * `key` - Key to look up
    ///
    /// # Returns
    /// * `Option<String>` - Copy of the value, or `None` on a miss (which
    ///   changes nothing)
    pub fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock();
        match inner.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.to_owned())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Remove `key` from the cache
    ///
    /// # Arguments
    /// * `key` - Key to remove
    ///
    /// # Returns
    /// * `bool` - `true` if the key was present, `false` otherwise
    pub fn remove(&self, key: &str) -> bool {
        let removed = self.inner.lock().remove(key);
        if removed {
            self.stats.record_removal();
        }
        removed
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Membership test that leaves recency order untouched
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Snapshot of keys from most to least recently used
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.len();
        inner.clear();
        self.stats.reset();
        debug!(dropped, "cleared LRU cache");
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Verify the internal invariants under the lock
    ///
    /// Index and recency list must hold the same keys exactly once, every
    /// index handle must point at its own key's node, and the entry count
    /// must not exceed capacity.
    pub fn check_consistency(&self) -> Result<()> {
        self.inner.lock().check()
    }
}

impl Default for LruCache {
    fn default() -> Self {
        Self::with_config(&CacheConfig::default())
    }
}

impl Cacher for LruCache {
    fn add(&self, key: &str, value: &str) -> bool {
        LruCache::add(self, key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        LruCache::get(self, key)
    }

    fn remove(&self, key: &str) -> bool {
        LruCache::remove(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }
}
