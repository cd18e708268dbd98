//! Point-in-time view of a cache's recency order and contents.
//!
//! A [`CacheSnapshot`] is an owned copy, so it can be printed or compared
//! after the cache has moved on. Taking one never changes recency.
//!
//! The `Display` form lists keys from least to most recently used, then the
//! entries:
//!
//! ```text
//! 2-->
//! 1-->
//! ============
//! {2: "def", 1: "abc"}
//! ============
//! ```

use std::fmt;

/// Owned copy of a cache's keys (LRU to MRU) and entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot<K, V> {
    order: Vec<K>,
    entries: Vec<(K, V)>,
    capacity: usize,
}

impl<K, V> CacheSnapshot<K, V> {
    pub(crate) fn new(order: Vec<K>, entries: Vec<(K, V)>, capacity: usize) -> Self {
        Self {
            order,
            entries,
            capacity,
        }
    }

    /// Keys from least to most recently used.
    pub fn order(&self) -> &[K] {
        &self.order
    }

    /// Entries in the same order as [`order`](Self::order).
    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The key that would be evicted next.
    pub fn least_recent(&self) -> Option<&K> {
        self.order.first()
    }

    pub fn most_recent(&self) -> Option<&K> {
        self.order.last()
    }

    /// Consumes the snapshot, returning the entries LRU to MRU.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for CacheSnapshot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "============";

        for key in &self.order {
            writeln!(f, "{:?}-->", key)?;
        }
        writeln!(f, "{}", RULE)?;
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()?;
        writeln!(f)?;
        write!(f, "{}", RULE)
    }
}
