//! # Cache Trait Hierarchy
//!
//! Small, layered traits so code can depend on exactly the operations it
//! needs.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  put(&mut, K, V) → Result<Option<V>>    │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains / len / is_empty / capacity   │
//!   │  clear                                  │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru / peek_lru / touch             │
//!   │  recency_rank(&K) → Option<usize>       │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! A miss is `None`, never an error. The only fallible mutation is `put`,
//! which fails with [`CacheError::InvalidKey`](crate::error::CacheError::InvalidKey)
//! when a key validator rejects the key.
//!
//! ## Thread Safety
//!
//! These traits take `&mut self` for anything that reorders recency, so
//! implementors are single-threaded. Shared-state wrappers such as
//! [`ConcurrentLruCache`](crate::policy::lru::ConcurrentLruCache) expose
//! `&self` methods instead and carry the [`ConcurrentCache`] marker.

use crate::error::Result;

/// Operations every cache supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone()).unwrap();
///     }
/// }
///
/// let mut cache = LruCache::new(8).unwrap();
/// warm(&mut cache, &[(1, "a".into()), (2, "b".into())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Returns the previous value when the key was already present.
    fn put(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Looks up `key`, marking it most recently used on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is cached. Does not affect recency.
    fn contains(&self, key: &K) -> bool;

    /// Number of cached entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is cached.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Drops every entry.
    fn clear(&mut self);
}

/// Caches that allow removal of arbitrary keys.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key` and returns its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in `keys`, returning the removed values in order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered operations.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(3).unwrap();
/// cache.put(1, "first").unwrap();
/// cache.put(2, "second").unwrap();
/// cache.put(3, "third").unwrap();
///
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// assert!(cache.touch(&2));
/// assert_eq!(cache.pop_lru().map(|(k, _)| k), Some(3));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` most recently used without reading it.
    ///
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most recently used.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for cache types whose `&self` API is safe to share across threads.
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use lrukit::policy::lru::ConcurrentLruCache;
/// use lrukit::traits::ConcurrentCache;
///
/// fn assert_concurrent<C: ConcurrentCache>(_: &C) {}
///
/// let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(16).unwrap();
/// assert_concurrent(&cache);
/// # }
/// ```
pub trait ConcurrentCache: Send + Sync {}
