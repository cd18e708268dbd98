//! Deterministic key-to-shard mapping for [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache).
//!
//! ## Architecture
//!
//! ```text
//!   key ──► FxHasher(seed, key) ──► hash % shards ──► shard index
//!
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   │  A, E   │  B, F   │  C, G   │  D, H   │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The same `(key, seed, shards)` always yields the same shard, so a key
//! never migrates between shards for the lifetime of a cache.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::ShardSelector;
//!
//! let selector = ShardSelector::new(4, 0);
//! let shard = selector.shard_for_key(&"user:123");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key(&"user:123"), shard);
//! ```

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Deterministic shard selector using a seeded hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards with the given `seed`.
    ///
    /// The shard count is clamped to at least 1.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }

    /// Splits `total` capacity across the shards.
    ///
    /// The first `total % shards` shards get one extra slot, so the shares sum
    /// to exactly `total`.
    ///
    /// ```
    /// use lrukit::ds::ShardSelector;
    ///
    /// let selector = ShardSelector::new(3, 0);
    /// let shares: Vec<_> = (0..3).map(|i| selector.shard_capacity(10, i)).collect();
    /// assert_eq!(shares, vec![4, 3, 3]);
    /// ```
    pub fn shard_capacity(&self, total: usize, shard: usize) -> usize {
        let base = total / self.shards;
        let extra = usize::from(shard < total % self.shards);
        base + extra
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector with seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}
