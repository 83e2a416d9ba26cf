//! Configuration for the LRU cache.

use serde::{Deserialize, Serialize};

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Configuration for [`LruCache`](crate::LruCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries retained before LRU eviction.
    /// Zero is allowed and yields a cache that retains nothing.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(CacheConfig::new(), config);
    }

    #[test]
    fn test_builder() {
        let config = CacheConfig::new().with_capacity(128);
        assert_eq!(config.capacity, 128);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);

        let config: CacheConfig = serde_json::from_str(r#"{"capacity": 0}"#).unwrap();
        assert_eq!(config.capacity, 0);
    }
}
