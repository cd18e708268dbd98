//! # Metrics Traits
//!
//! Recording, snapshotting and exporting are split into separate traits so
//! the cache engine only ever writes counters and never knows how they are
//! published.
//!
//! ```text
//!   ┌─────────────────────┐        ┌─────────────────────────┐
//!   │ CoreMetricsRecorder │◄───────│  LruMetricsRecorder     │
//!   │ get/put/evict/clear │        │  pop/touch/rank (&mut)  │
//!   └─────────────────────┘        └─────────────────────────┘
//!                                  ┌─────────────────────────┐
//!                                  │ LruMetricsReadRecorder  │
//!                                  │  peek/rank (&self)      │
//!                                  └─────────────────────────┘
//!
//!   MetricsSnapshotProvider<S> ──► S ──► MetricsExporter<S>
//! ```

/// Counters shared by every cache operation.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_insert_rejected(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Recency-specific counters for `&mut self` paths.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Recency-specific counters for `&self` paths (interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
