//! Unsynchronized LRU core
//!
//! Lookup index (key -> value + list slot) paired with the recency list.
//! All locking happens one level up in [`LruCache`](crate::LruCache).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use ahash::RandomState;

use crate::error::{Error, Result};
use crate::list::KeyList;

/// Upper bound on slots reserved at construction; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// Index entry: current value and the key's slot in the recency list
struct Slot {
    value: String,
    node: usize,
}

/// What `put` did to the cache
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Put {
    /// Existing key, value overwritten and promoted
    Updated,
    /// New key inserted without eviction
    Inserted,
    /// New key inserted after evicting the carried key
    Evicted(Arc<str>),
    /// Capacity is zero, nothing retained
    Dropped,
}

/// LRU map with fixed capacity
pub(crate) struct Lru {
    index: HashMap<Arc<str>, Slot, RandomState>,
    order: KeyList,
    capacity: usize,
}

impl Lru {
    pub(crate) fn new(capacity: usize) -> Self {
        let reserve = capacity.min(PREALLOC_LIMIT);
        Self {
            index: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            order: KeyList::with_capacity(reserve),
            capacity,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn get(&mut self, key: &str) -> Option<&str> {
        let slot = self.index.get(key)?;
        self.order.move_to_front(slot.node);
        Some(slot.value.as_str())
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn put(&mut self, key: &str, value: &str) -> Put {
        if let Some(slot) = self.index.get_mut(key) {
            slot.value.clear();
            slot.value.push_str(value);
            self.order.move_to_front(slot.node);
            return Put::Updated;
        }

        if self.capacity == 0 {
            return Put::Dropped;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let key: Arc<str> = Arc::from(key);
        let node = self.order.push_front(Arc::clone(&key));
        self.index.insert(
            key,
            Slot {
                value: value.to_owned(),
                node,
            },
        );

        match evicted {
            Some(key) => Put::Evicted(key),
            None => Put::Inserted,
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(slot) => {
                self.order.remove(slot.node);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Keys from most to least recently used
    pub(crate) fn keys(&self) -> Vec<String> {
        self.order.iter().map(|key| key.to_string()).collect()
    }

    /// Verify that index and recency list describe the same entries.
    pub(crate) fn check(&self) -> Result<()> {
        let order_len = self.order.len();
        if self.index.len() != order_len {
            return Err(Error::LengthMismatch {
                index: self.index.len(),
                order: order_len,
            });
        }
        if order_len > self.capacity {
            return Err(Error::OverCapacity {
                len: order_len,
                capacity: self.capacity,
            });
        }

        let mut expected_prev = None;
        let mut walked = 0;
        for (idx, prev, _) in self.order.links() {
            if prev != expected_prev {
                return Err(Error::BrokenLink(idx));
            }
            expected_prev = Some(idx);
            walked += 1;
        }
        if walked != order_len || expected_prev != self.order.tail() {
            return Err(Error::BrokenLink(expected_prev.unwrap_or_default()));
        }

        let mut seen: HashSet<&str, RandomState> =
            HashSet::with_capacity_and_hasher(order_len, RandomState::new());
        for key in self.order.iter() {
            if !seen.insert(&**key) {
                return Err(Error::DuplicateKey(key.to_string()));
            }
        }

        for (key, slot) in &self.index {
            match self.order.key(slot.node) {
                Some(linked) if linked == key => {}
                _ => return Err(Error::DanglingHandle(key.to_string())),
            }
        }

        Ok(())
    }

    fn evict(&mut self) -> Option<Arc<str>> {
        let key = self.order.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_basic() {
        let mut cache = Lru::new(2);

        assert_eq!(cache.put("1", "a"), Put::Inserted);
        assert_eq!(cache.put("2", "b"), Put::Inserted);

        assert_eq!(cache.get("1"), Some("a"));
        assert_eq!(cache.get("2"), Some("b"));
        assert_eq!(cache.len(), 2);
        cache.check().unwrap();
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = Lru::new(2);

        cache.put("1", "a");
        cache.put("2", "b");
        assert_eq!(cache.put("3", "c"), Put::Evicted(Arc::from("1")));

        assert_eq!(cache.get("1"), None);
        assert_eq!(cache.get("2"), Some("b"));
        assert_eq!(cache.get("3"), Some("c"));
        cache.check().unwrap();
    }

    #[test]
    fn test_lru_get_promotes() {
        let mut cache = Lru::new(2);

        cache.put("1", "a");
        cache.put("2", "b");
        cache.get("1"); // Move 1 to front
        cache.put("3", "c"); // Should evict 2

        assert_eq!(cache.get("1"), Some("a"));
        assert_eq!(cache.get("2"), None);
        assert_eq!(cache.get("3"), Some("c"));
    }

    #[test]
    fn test_lru_overwrite_promotes() {
        let mut cache = Lru::new(2);

        cache.put("1", "a");
        cache.put("2", "b");
        assert_eq!(cache.put("1", "z"), Put::Updated);
        cache.put("3", "c"); // Should evict 2

        assert_eq!(cache.get("1"), Some("z"));
        assert_eq!(cache.get("2"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = Lru::new(3);

        cache.put("1", "a");
        cache.put("2", "b");
        cache.put("3", "c");

        assert!(cache.remove("2"));
        assert!(!cache.remove("2"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("2"), None);
        assert_eq!(cache.keys(), vec!["3", "1"]);
        cache.check().unwrap();
    }

    #[test]
    fn test_lru_miss_leaves_order() {
        let mut cache = Lru::new(3);

        cache.put("1", "a");
        cache.put("2", "b");
        let before = cache.keys();

        assert_eq!(cache.get("missing"), None);
        assert!(!cache.contains("missing"));
        assert_eq!(cache.keys(), before);
    }

    #[test]
    fn test_lru_contains_does_not_promote() {
        let mut cache = Lru::new(2);

        cache.put("1", "a");
        cache.put("2", "b");
        assert!(cache.contains("1"));
        cache.put("3", "c");

        assert!(!cache.contains("1"));
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = Lru::new(3);

        cache.put("1", "a");
        cache.put("2", "b");
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.keys().is_empty());
        cache.check().unwrap();

        cache.put("3", "c");
        assert_eq!(cache.get("3"), Some("c"));
    }

    #[test]
    fn test_lru_zero_capacity() {
        let mut cache = Lru::new(0);

        assert_eq!(cache.put("1", "a"), Put::Dropped);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get("1"), None);
        cache.check().unwrap();
    }

    #[test]
    fn test_lru_huge_capacity_reserves_lazily() {
        let mut cache = Lru::new(usize::MAX);

        assert_eq!(cache.capacity(), usize::MAX);
        assert!(cache.index.capacity() < 4 * PREALLOC_LIMIT);
        assert_eq!(cache.put("1", "a"), Put::Inserted);
        assert_eq!(cache.get("1"), Some("a"));
        cache.check().unwrap();
    }

    #[test]
    fn test_lru_empty_key_and_value() {
        let mut cache = Lru::new(1);

        cache.put("", "");
        assert_eq!(cache.get(""), Some(""));
        assert!(cache.remove(""));
    }

    #[test]
    fn test_check_detects_dangling_handle() {
        let mut cache = Lru::new(2);

        cache.put("1", "a");
        cache.put("2", "b");
        // Point "1" at the slot holding "2"
        let other = cache.index["2"].node;
        if let Some(slot) = cache.index.get_mut("1") {
            slot.node = other;
        }

        assert_eq!(cache.check(), Err(Error::DanglingHandle("1".to_string())));
    }

    #[test]
    fn test_check_detects_length_mismatch() {
        let mut cache = Lru::new(2);

        cache.put("1", "a");
        cache.index.remove("1");

        assert_eq!(
            cache.check(),
            Err(Error::LengthMismatch { index: 0, order: 1 })
        );
    }
}
