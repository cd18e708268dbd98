//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: The error returned by fallible cache operations
//!   (construction and [`put`](crate::policy::lru::LruCache::put)).
//! - [`ConfigError`]: Describes which configuration parameter was rejected
//!   (e.g. zero capacity, zero shards).
//! - [`InvariantError`]: Returned by `check_invariants` when the index and the
//!   recency list disagree.
//!
//! A cache miss is **not** an error. Lookups return `Option<&V>` and a miss is
//! plain `None`.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::CacheError;
//! use lrukit::policy::lru::LruCache;
//!
//! let err = LruCache::<u64, String>::new(0).unwrap_err();
//! assert!(matches!(err, CacheError::InvalidConfiguration(_)));
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

use thiserror::Error;

/// Result alias used by fallible cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by fallible cache operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction parameters were rejected; no cache was built.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The key was rejected by the cache's key validator. The cache is left
    /// unchanged.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl CacheError {
    /// Shorthand for a [`CacheError::InvalidConfiguration`] with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(ConfigError::new(msg))
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on
/// [`RecencyList`](crate::ds::RecencyList) and
/// [`LruCache`](crate::policy::lru::LruCache). Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error describing an invalid configuration parameter.
///
/// Produced by [`CacheConfig::validate`](crate::builder::CacheConfig::validate)
/// and wrapped in [`CacheError::InvalidConfiguration`] by every fallible
/// constructor.
///
/// # Example
///
/// ```
/// use lrukit::builder::CacheConfig;
///
/// let config = CacheConfig { capacity: 0, ..Default::default() };
/// let err = config.validate().unwrap_err();
/// assert!(err.message().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
