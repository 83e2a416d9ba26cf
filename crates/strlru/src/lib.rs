//! # strlru
//!
//! Fixed-capacity, thread-safe LRU cache mapping string keys to string values.
//!
//! ## Architecture
//! - **Lookup index**: AHash map from key to value and list slot (O(1))
//! - **Recency list**: arena-backed doubly-linked list of keys (O(1) promote/evict)
//! - **Locking**: one `parking_lot::Mutex` guards both, for every operation
//!
//! ```
//! use strlru::LruCache;
//!
//! let cache = LruCache::new(2);
//! cache.add("a", "1");
//! cache.add("b", "2");
//! cache.get("a");
//! cache.add("c", "3"); // evicts "b"
//!
//! assert_eq!(cache.get("b"), None);
//! assert_eq!(cache.len(), 2);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod list;
mod lru;
mod stats;

pub use cache::LruCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use stats::CacheStats;

/// Key/value cache capability
///
/// Callers that only need caching behavior can hold a `dyn Cacher` and stay
/// independent of the eviction policy behind it.
pub trait Cacher: Send + Sync {
    /// Insert or overwrite `key`. Returns `true`.
    fn add(&self, key: &str, value: &str) -> bool;

    /// Look up `key`, returning a copy of its value.
    fn get(&self, key: &str) -> Option<String>;

    /// Remove `key`, returning whether it was present.
    fn remove(&self, key: &str) -> bool;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
