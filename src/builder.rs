//! Validated construction for every cache flavor.
//!
//! [`CacheConfig`] holds the plain parameters and can be checked on its own;
//! [`CacheBuilder`] adds an optional key validator and produces a
//! single-threaded [`LruCache`], a shared [`ConcurrentLruCache`], or a
//! [`ShardedLruCache`]. Every `build*` method validates first, so no partially
//! configured cache is ever returned.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .key_validator(|key: &String| key.len() <= 64)
//!     .build::<u64>()
//!     .unwrap();
//! cache.put("session:1".to_string(), 42).unwrap();
//! assert_eq!(cache.get("session:1"), Some(&42));
//! assert!(cache.put("x".repeat(65), 0).is_err());
//! ```

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::error::{CacheError, ConfigError, Result};
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::{KeyValidator, LruCache};
#[cfg(feature = "concurrency")]
use crate::policy::sharded::ShardedLruCache;

/// Plain cache parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries. Must be non-zero.
    pub capacity: usize,
    /// Reserve index and arena storage for `capacity` entries up front.
    pub prealloc: bool,
    /// Number of shards. Only [`CacheBuilder::build_sharded`] accepts more
    /// than one.
    pub shards: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc: true,
            shards: 1,
        }
    }
}

impl CacheConfig {
    /// Checks the parameters without building anything.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        if self.shards == 0 {
            return Err(ConfigError::new("shards must be greater than zero"));
        }
        if self.shards > self.capacity {
            return Err(ConfigError::new(format!(
                "shards ({}) must not exceed capacity ({})",
                self.shards, self.capacity
            )));
        }
        Ok(())
    }

    fn non_zero_capacity(&self) -> std::result::Result<NonZeroUsize, ConfigError> {
        self.validate()?;
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| ConfigError::new("capacity must be greater than zero"))
    }
}

/// Builder for caches keyed by `K`.
pub struct CacheBuilder<K> {
    config: CacheConfig,
    seed: u64,
    validator: Option<KeyValidator<K>>,
}

impl<K> CacheBuilder<K> {
    /// Starts from the default config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self::from_config(CacheConfig {
            capacity,
            ..CacheConfig::default()
        })
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self {
            config,
            seed: 0,
            validator: None,
        }
    }

    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    pub fn shards(mut self, shards: usize) -> Self {
        self.config.shards = shards;
        self
    }

    /// Seed mixed into the shard hash.
    pub fn shard_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects keys for which `validator` returns `false`.
    ///
    /// Rejected `put` calls fail with [`CacheError::InvalidKey`].
    pub fn key_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&K) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl<K> CacheBuilder<K>
where
    K: Eq + Hash + Clone,
{
    /// Builds a single-threaded [`LruCache`].
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidConfiguration`] if the config is invalid or asks
    /// for more than one shard.
    pub fn build<V>(self) -> Result<LruCache<K, V>> {
        let capacity = self.config.non_zero_capacity()?;
        if self.config.shards != 1 {
            return Err(CacheError::config("multiple shards require build_sharded"));
        }
        Ok(LruCache::from_parts(capacity, self.validator, self.config.prealloc))
    }

    /// Builds a [`ConcurrentLruCache`] behind a single lock.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<V>(self) -> Result<ConcurrentLruCache<K, V>>
    where
        K: Send + Sync,
        V: Send + Sync,
    {
        self.build().map(ConcurrentLruCache::from)
    }

    /// Builds a [`ShardedLruCache`] with `config.shards` shards.
    ///
    /// ```
    /// use lrukit::builder::CacheBuilder;
    ///
    /// let cache = CacheBuilder::<u64>::new(10)
    ///     .shards(3)
    ///     .build_sharded::<String>()
    ///     .unwrap();
    /// cache.put(1, "one".to_string()).unwrap();
    /// assert_eq!(cache.capacity(), 10);
    /// assert_eq!(cache.shard_count(), 3);
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn build_sharded<V>(self) -> Result<ShardedLruCache<K, V>>
    where
        K: Send + Sync,
        V: Send + Sync,
    {
        self.config.validate()?;
        ShardedLruCache::from_parts(
            self.config.capacity,
            self.config.shards,
            self.seed,
            self.validator,
            self.config.prealloc,
        )
    }
}

impl<K> fmt::Debug for CacheBuilder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
