//! Error types for strlru
//!
//! Cache operations themselves never fail. These errors are only produced by
//! [`LruCache::check_consistency`](crate::LruCache::check_consistency).

use std::fmt;

/// Result type alias for strlru diagnostics
pub type Result<T> = std::result::Result<T, Error>;

/// A broken cache invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Index size and recency list length differ
    LengthMismatch {
        /// Number of keys in the lookup index
        index: usize,
        /// Number of nodes in the recency list
        order: usize,
    },

    /// More entries than the configured capacity
    OverCapacity {
        /// Current entry count
        len: usize,
        /// Configured capacity
        capacity: usize,
    },

    /// Index entry points at a freed slot or at another key's slot
    DanglingHandle(String),

    /// Key linked into the recency list more than once
    DuplicateKey(String),

    /// Link pointers around this slot do not mirror each other
    BrokenLink(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LengthMismatch { index, order } => write!(
                f,
                "Length mismatch: index has {} keys, recency list has {}",
                index, order
            ),
            Error::OverCapacity { len, capacity } => {
                write!(f, "Over capacity: {} entries (max {})", len, capacity)
            }
            Error::DanglingHandle(key) => write!(f, "Dangling handle for key {:?}", key),
            Error::DuplicateKey(key) => write!(f, "Duplicate key in recency list: {:?}", key),
            Error::BrokenLink(slot) => write!(f, "Broken link at slot {}", slot),
        }
    }
}

impl std::error::Error for Error {}
