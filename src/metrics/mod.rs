//! Operation counters for [`LruCache`](crate::policy::lru::LruCache).
//!
//! Compiled only with the `metrics` feature. Recording lives in
//! [`metrics_impl`], read-side views in [`snapshot`], and publishing in
//! [`exporter`].

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
