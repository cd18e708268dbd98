//! lrukit: a fixed-capacity LRU cache with arena-backed recency tracking.
//!
//! [`LruCache`] keeps a key index and a sentinel-bounded recency list in
//! lockstep, so `get` and `put` are O(1) and the least recently used entry is
//! always the next to go. [`ConcurrentLruCache`] and [`ShardedLruCache`] share
//! it across threads (feature `concurrency`, on by default).
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "one")?;
//! cache.put(2, "two")?;
//! cache.get(&1);
//! cache.put(3, "three")?;
//! assert!(!cache.contains(&2));
//! # Ok::<(), CacheError>(())
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod snapshot;
pub mod traits;

pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::{KeyValidator, LruCache, PutOutcome};
#[cfg(feature = "concurrency")]
pub use crate::policy::sharded::ShardedLruCache;
pub use crate::snapshot::CacheSnapshot;
