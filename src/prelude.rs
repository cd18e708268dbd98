pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::ds::{RecencyList, ShardSelector, SlotArena, SlotId};
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::{KeyValidator, LruCache, PutOutcome};
#[cfg(feature = "concurrency")]
pub use crate::policy::sharded::ShardedLruCache;
pub use crate::snapshot::CacheSnapshot;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
