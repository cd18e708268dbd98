//! Key-hash sharded LRU cache.
//!
//! Splits the key space over N independent [`LruCache`] shards, each behind
//! its own `parking_lot::Mutex`. Threads touching different shards never
//! contend. The price is precision: recency is tracked per shard, so the
//! entry evicted is the least recently used one *in its shard*, not globally.
//!
//! ## Architecture
//!
//! ```text
//!   key ──► ShardSelector ──► shard i
//!
//!   ┌──────────────────┬──────────────────┬──────────────────┐
//!   │ Mutex<LruCache>  │ Mutex<LruCache>  │ Mutex<LruCache>  │
//!   │  capacity 4      │  capacity 3      │  capacity 3      │
//!   └──────────────────┴──────────────────┴──────────────────┘
//!                       total capacity 10
//! ```
//!
//! Shard capacities sum to the requested total, so `len() <= capacity()`
//! holds for the whole cache as well as for every shard.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::sharded::ShardedLruCache;
//!
//! let cache: ShardedLruCache<u64, String> = ShardedLruCache::new(1024, 8).unwrap();
//! cache.put(7, "seven".to_string()).unwrap();
//! assert_eq!(cache.get(&7).as_deref(), Some("seven"));
//! assert_eq!(cache.shard_count(), 8);
//! ```

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

use parking_lot::Mutex;

use crate::ds::ShardSelector;
use crate::error::{CacheError, InvariantError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::lru::{KeyValidator, LruCache, PutOutcome};
use crate::traits::ConcurrentCache;

/// LRU cache partitioned into independently locked shards.
pub struct ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    shards: Box<[Mutex<LruCache<K, V>>]>,
    selector: ShardSelector,
    capacity: usize,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a cache of `capacity` entries spread over `shards` shards.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] when `capacity` or
    /// `shards` is zero, or when there are more shards than capacity.
    pub fn new(capacity: usize, shards: usize) -> Result<Self> {
        Self::from_parts(capacity, shards, 0, None, true)
    }

    pub(crate) fn from_parts(
        capacity: usize,
        shards: usize,
        seed: u64,
        validator: Option<KeyValidator<K>>,
        prealloc: bool,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::config("capacity must be greater than zero"));
        }
        if shards == 0 {
            return Err(CacheError::config("shards must be greater than zero"));
        }
        if shards > capacity {
            return Err(CacheError::config(format!(
                "shards ({}) must not exceed capacity ({})",
                shards, capacity
            )));
        }

        let selector = ShardSelector::new(shards, seed);
        let shards = (0..shards)
            .map(|i| -> Result<Mutex<LruCache<K, V>>> {
                let share = NonZeroUsize::new(selector.shard_capacity(capacity, i))
                    .ok_or_else(|| CacheError::config("shard capacity must be greater than zero"))?;
                Ok(Mutex::new(LruCache::from_parts(
                    share,
                    validator.clone(),
                    prealloc,
                )))
            })
            .collect::<Result<Vec<_>>>()?
            .into_boxed_slice();

        Ok(Self {
            shards,
            selector,
            capacity,
        })
    }

    fn shard(&self, key: &K) -> &Mutex<LruCache<K, V>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Inserts or updates `key` in its shard. See [`LruCache::put`].
    pub fn put(&self, key: K, value: V) -> Result<Option<V>> {
        self.shard(&key).lock().put(key, value)
    }

    /// See [`LruCache::put_evicting`]. The evicted entry comes from the same
    /// shard as `key`.
    pub fn put_evicting(&self, key: K, value: V) -> Result<PutOutcome<K, V>> {
        self.shard(&key).lock().put_evicting(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.shard(key).lock().get(key).map(f)
    }

    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.shard(key).lock().touch(key)
    }

    /// Total entries across shards.
    ///
    /// Shards are locked one at a time, so under concurrent writes the sum
    /// is not an atomic snapshot.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard that owns `key`.
    pub fn shard_for_key(&self, key: &K) -> usize {
        self.selector.shard_for_key(key)
    }

    /// Capacity of shard `index`, or `None` if out of range.
    pub fn shard_capacity(&self, index: usize) -> Option<usize> {
        self.shards.get(index).map(|shard| shard.lock().capacity())
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
    }

    /// Runs [`LruCache::check_invariants`] on every shard and checks that
    /// each key lives in the shard its hash selects.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        for (index, shard) in self.shards.iter().enumerate() {
            let shard = shard.lock();
            shard
                .check_invariants()
                .map_err(|err| InvariantError::new(format!("shard {}: {}", index, err)))?;
            if shard.keys().any(|key| self.selector.shard_for_key(key) != index) {
                return Err(InvariantError::new(format!(
                    "shard {} holds a key that hashes elsewhere",
                    index
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> ConcurrentCache for ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}

impl<K, V> fmt::Debug for ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shards", &self.shards.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Sum of every shard's counters and gauges.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.shards
            .iter()
            .map(|shard| shard.lock().metrics_snapshot())
            .fold(LruMetricsSnapshot::default(), LruMetricsSnapshot::merge)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
