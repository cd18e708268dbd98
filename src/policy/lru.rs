//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity cache that evicts the least recently accessed entry once a
//! new key would push it past capacity. Every `get`, `put` and eviction keeps
//! two structures in lockstep: an index from key to list node and a
//! sentinel-bounded recency list ordered from least to most recently used.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     ConcurrentLruCache<K, V>                         │
//!   │             Arc<parking_lot::RwLock<LruCache<K, V>>>                 │
//!   └──────────────────────────────────┬───────────────────────────────────┘
//!                                      ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>                                        │
//!   │   ┌─────────┬────────┐                                               │
//!   │   │   Key   │ SlotId │                                               │
//!   │   ├─────────┼────────┤                                               │
//!   │   │  "a"    │   2  ──┼──────────┐                                    │
//!   │   │  "b"    │   3  ──┼──────────┼─────────┐                          │
//!   │   │  "c"    │   4  ──┼──────────┼─────────┼─────────┐                │
//!   │   └─────────┴────────┘          ▼         ▼         ▼                │
//!   │                                                                      │
//!   │   order: RecencyList<Entry<K, V>>                                    │
//!   │   head ──► [a:1] ◄──► [b:2] ◄──► [c:3] ◄── tail                      │
//!   │            LRU                   MRU                                 │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `head` and `tail` are sentinel slots in the arena. They never carry an
//! entry, so splicing at either end has no empty-list special case.
//!
//! ## Operation Flow
//!
//! ```text
//!   put(d) on a full cache (capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════
//!     head ──► [a] ◄──► [b] ◄──► [c] ◄── tail
//!
//!     1. append [d] before tail          [a] [b] [c] [d]
//!     2. evict head.next ([a])           [b] [c] [d]
//!        and drop "a" from the index
//!
//!   get(b)
//!   ═══════════════════════════════════════════════════════════════════
//!     head ──► [b] ◄──► [c] ◄──► [d] ◄── tail
//!
//!     1. index lookup: O(1)
//!     2. unlink [b], relink before tail
//!
//!     head ──► [c] ◄──► [d] ◄──► [b] ◄── tail
//! ```
//!
//! ## Key Components
//!
//! | Component               | Description                                       |
//! |-------------------------|---------------------------------------------------|
//! | `LruCache<K, V>`        | Single-threaded engine: index + recency list      |
//! | `ConcurrentLruCache`    | `parking_lot::RwLock` wrapper, values cloned out  |
//! | `PutOutcome<K, V>`      | What a `put_evicting` did (insert/update/evict)   |
//! | `KeyValidator<K>`       | Optional predicate that rejects keys on `put`     |
//!
//! ## Complexity
//!
//! | Operation      | Time   | Notes                                  |
//! |----------------|--------|----------------------------------------|
//! | `get`          | O(1)   | Moves the entry to the MRU end         |
//! | `put`          | O(1)   | May evict one entry                    |
//! | `peek`         | O(1)   | No reordering                          |
//! | `remove`       | O(1)   |                                        |
//! | `pop_lru`      | O(1)   |                                        |
//! | `touch`        | O(1)   |                                        |
//! | `recency_rank` | O(n)   | Walks from the MRU end                 |
//! | `iter`         | O(n)   | LRU to MRU                             |
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1).unwrap();
//! cache.put("b", 2).unwrap();
//!
//! // "a" becomes most recently used, so "b" is evicted next.
//! assert_eq!(cache.get(&"a"), Some(&1));
//! cache.put("c", 3).unwrap();
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.keys().collect::<Vec<_>>(), vec![&"a", &"c"]);
//! ```
//!
//! ## Thread Safety
//!
//! - `LruCache`: not synchronized; every reordering operation takes `&mut self`.
//! - `ConcurrentLruCache`: one `RwLock` guards index and list as a unit.
//!   `get` takes the write lock because it reorders; `peek` only reads.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::{debug, trace, warn};
#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::error::{CacheError, InvariantError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::snapshot::CacheSnapshot;
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Predicate deciding whether a key may enter the cache.
///
/// Shared between shards of a [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache),
/// hence the `Arc`.
pub type KeyValidator<K> = Arc<dyn Fn(&K) -> bool + Send + Sync>;

/// Upper bound on the entries reserved up front when preallocating. Larger
/// caches grow on demand past this point.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Key/value pair stored in a recency list node.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Result of [`LruCache::put_evicting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<K, V> {
    /// A new key was added without evicting anything.
    Inserted,
    /// The key existed; carries the replaced value.
    Updated(V),
    /// A new key was added and the least recently used entry was evicted.
    Evicted(K, V),
}

impl<K, V> PutOutcome<K, V> {
    /// Returns the replaced value of an update.
    pub fn into_replaced(self) -> Option<V> {
        match self {
            PutOutcome::Updated(old) => Some(old),
            _ => None,
        }
    }

    /// Returns the evicted pair, if any.
    pub fn into_evicted(self) -> Option<(K, V)> {
        match self {
            PutOutcome::Evicted(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

/// Single-threaded LRU cache.
///
/// Keys are held twice (index and list node), hence `K: Clone`.
/// Values carry no bounds.
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: NonZeroUsize,
    validator: Option<KeyValidator<K>>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] when `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(LruCache::<u32, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| CacheError::config("capacity must be greater than zero"))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Creates a cache from a capacity that is already known to be non-zero.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::from_parts(capacity, None, true)
    }

    pub(crate) fn from_parts(
        capacity: NonZeroUsize,
        validator: Option<KeyValidator<K>>,
        prealloc: bool,
    ) -> Self {
        let (index, order) = if prealloc {
            let reserve = capacity.get().min(PREALLOC_LIMIT);
            (
                FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
                RecencyList::with_capacity(reserve),
            )
        } else {
            (FxHashMap::default(), RecencyList::new())
        };
        trace!(
            "created LruCache (capacity {}, prealloc {}, validator {})",
            capacity,
            prealloc,
            validator.is_some()
        );
        Self {
            index,
            order,
            capacity,
            validator,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Installs a predicate that `put` consults before admitting a key.
    ///
    /// ```
    /// use lrukit::error::CacheError;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(4)
    ///     .unwrap()
    ///     .with_key_validator(|key: &String| !key.is_empty());
    ///
    /// assert!(cache.put("ok".to_string(), 1).is_ok());
    /// let err = cache.put(String::new(), 2).unwrap_err();
    /// assert!(matches!(err, CacheError::InvalidKey(_)));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn with_key_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&K) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is cached. Does not affect recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Looks up `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put(1, "one").unwrap();
    /// cache.put(2, "two").unwrap();
    ///
    /// assert_eq!(cache.get(&1), Some(&"one"));
    /// assert_eq!(cache.get(&3), None);
    ///
    /// // 1 was refreshed, so 2 is evicted.
    /// cache.put(3, "three").unwrap();
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.promote(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.promote(key)?;
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Looks up `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.index.get(key)?;
        let value = self.order.get(id).map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_peek_found();
        }

        value
    }

    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Returns the previous value when the key was present. When a new key
    /// would exceed capacity, the least recently used entry is evicted; use
    /// [`put_evicting`](Self::put_evicting) to receive it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] when a key validator rejects `key`.
    /// The cache is left unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.put_evicting(key, value).map(PutOutcome::into_replaced)
    }

    /// Inserts or updates `key` and reports what happened.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::{LruCache, PutOutcome};
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// assert_eq!(cache.put_evicting(1, 'a').unwrap(), PutOutcome::Inserted);
    /// assert_eq!(cache.put_evicting(2, 'b').unwrap(), PutOutcome::Inserted);
    /// assert_eq!(cache.put_evicting(1, 'A').unwrap(), PutOutcome::Updated('a'));
    /// assert_eq!(cache.put_evicting(3, 'c').unwrap(), PutOutcome::Evicted(2, 'b'));
    /// ```
    pub fn put_evicting(&mut self, key: K, value: V) -> Result<PutOutcome<K, V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        self.validate_key(&key)?;

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let entry = self.order.get_mut(id).expect("index/list out of sync");
            let old = mem::replace(&mut entry.value, value);
            self.order.move_to_back(id);
            return Ok(PutOutcome::Updated(old));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if self.index.len() > self.capacity.get() {
            if let Some((key, value)) = self.evict_lru() {
                return Ok(PutOutcome::Evicted(key, value));
            }
        }
        Ok(PutOutcome::Inserted)
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.order.pop_front()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    /// Returns the least recently used entry without reordering.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.order.front()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// Returns the most recently used entry without reordering.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Marks `key` most recently used without reading it.
    ///
    /// Returns `false` if the key is absent.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let moved = self.order.move_to_back(id);

        #[cfg(feature = "metrics")]
        if moved {
            self.metrics.record_touch_found();
        }

        moved
    }

    /// Position of `key` in recency order, `0` being most recently used.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(3).unwrap();
    /// cache.put('a', 1).unwrap();
    /// cache.put('b', 2).unwrap();
    /// cache.put('c', 3).unwrap();
    ///
    /// assert_eq!(cache.recency_rank(&'c'), Some(0));
    /// assert_eq!(cache.recency_rank(&'a'), Some(2));
    /// assert_eq!(cache.recency_rank(&'z'), None);
    /// ```
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let target = *self.index.get(key)?;
        for (rank, id) in self.order.iter_ids().rev().enumerate() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    /// Drops every entry. Capacity and validator are kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!("clearing LruCache ({} entries)", self.index.len());
        self.index.clear();
        self.order.clear();
    }

    /// Iterates entries from least to most recently used.
    ///
    /// Iteration does not affect recency.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates keys from least to most recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Iterates values from least to most recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.order.iter().map(|entry| &entry.value)
    }

    /// Captures the recency order and contents for inspection.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(3).unwrap();
    /// cache.put(1, "abc").unwrap();
    /// cache.put(2, "def").unwrap();
    /// cache.get(&1);
    ///
    /// let snapshot = cache.snapshot();
    /// assert_eq!(snapshot.order(), &[2, 1]);
    /// assert_eq!(snapshot.most_recent(), Some(&1));
    /// ```
    pub fn snapshot(&self) -> CacheSnapshot<K, V>
    where
        V: Clone,
    {
        CacheSnapshot::new(
            self.keys().cloned().collect(),
            self.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            self.capacity.get(),
        )
    }

    /// Verifies that the index and the recency list agree.
    ///
    /// Checks the list's own link invariants, that both structures hold the
    /// same number of entries within capacity, and that every index entry
    /// points at a node carrying the same key.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.order.check_invariants()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} entries but recency list has {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            let entry = self.order.get(id).ok_or_else(|| {
                InvariantError::new(format!("index points at missing node {:?}", id))
            })?;
            if entry.key != *key {
                return Err(InvariantError::new(format!(
                    "node {:?} carries a different key than its index entry",
                    id
                )));
            }
        }
        Ok(())
    }

    /// Removes the least recently used entry from both list and index.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let entry = self.order.pop_front()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        debug!(
            "evicted least recently used entry (len {}, capacity {})",
            self.index.len(),
            self.capacity
        );
        Some((entry.key, entry.value))
    }

    /// Moves `key` to the MRU end and returns its slot.
    fn promote<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_back(id);
        Some(id)
    }

    fn validate_key(&mut self, key: &K) -> Result<()> {
        match &self.validator {
            Some(validator) if !validator(key) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_rejected();
                Err(CacheError::InvalidKey("rejected by key validator".into()))
            },
            _ => Ok(()),
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        LruCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            insert_rejected: self.metrics.insert_rejected,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.index.len(),
            capacity: self.capacity.get(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Puts every pair in order. Keys rejected by the validator are skipped.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(err) = self.put(key, value) {
                warn!("skipping entry during extend: {}", err);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ConcurrentLruCache
// ---------------------------------------------------------------------------

/// Thread-safe LRU cache behind one `parking_lot::RwLock`.
///
/// Index and recency list are guarded together, so no reader ever observes
/// them out of step. Values are cloned out so no guard outlives a call; use
/// [`get_with`](Self::get_with) to read in place.
///
/// Cloning the handle shares the same cache.
///
/// ```
/// use std::thread;
///
/// use lrukit::policy::lru::ConcurrentLruCache;
///
/// let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(64).unwrap();
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             for i in 0..32 {
///                 cache.put(t * 100 + i, i).unwrap();
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(cache.len(), 64);
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> From<LruCache<K, V>> for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a shared cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        LruCache::new(capacity).map(Self::from)
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::from(LruCache::with_capacity(capacity))
    }

    /// Inserts or updates `key`. See [`LruCache::put`].
    pub fn put(&self, key: K, value: V) -> Result<Option<V>> {
        self.inner.write().put(key, value)
    }

    /// Inserts or updates `key`. See [`LruCache::put_evicting`].
    pub fn put_evicting(&self, key: K, value: V) -> Result<PutOutcome<K, V>> {
        self.inner.write().put_evicting(key, value)
    }

    /// Looks up `key`, marks it most recently used and clones the value out.
    ///
    /// Takes the write lock because it reorders.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Looks up `key`, marks it most recently used and maps the value in place.
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(4).unwrap();
    /// cache.put("greeting", "hello world".to_string()).unwrap();
    /// assert_eq!(cache.get_with(&"greeting", |v| v.len()), Some(11));
    /// ```
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.write().get(key).map(f)
    }

    /// Looks up `key` without reordering. Only takes the read lock.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    pub fn peek_lru(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .read()
            .peek_lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.inner.read().recency_rank(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn snapshot(&self) -> CacheSnapshot<K, V>
    where
        V: Clone,
    {
        self.inner.read().snapshot()
    }

    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
