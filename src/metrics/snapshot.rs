/// Point-in-time copy of an [`LruCache`](crate::policy::lru::LruCache)'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_rejected: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before the first call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Sums two snapshots. Used to aggregate shards.
    pub fn merge(self, other: Self) -> Self {
        Self {
            get_calls: self.get_calls + other.get_calls,
            get_hits: self.get_hits + other.get_hits,
            get_misses: self.get_misses + other.get_misses,
            insert_calls: self.insert_calls + other.insert_calls,
            insert_updates: self.insert_updates + other.insert_updates,
            insert_new: self.insert_new + other.insert_new,
            insert_rejected: self.insert_rejected + other.insert_rejected,
            evict_calls: self.evict_calls + other.evict_calls,
            evicted_entries: self.evicted_entries + other.evicted_entries,
            clear_calls: self.clear_calls + other.clear_calls,
            pop_lru_calls: self.pop_lru_calls + other.pop_lru_calls,
            pop_lru_found: self.pop_lru_found + other.pop_lru_found,
            touch_calls: self.touch_calls + other.touch_calls,
            touch_found: self.touch_found + other.touch_found,
            peek_calls: self.peek_calls + other.peek_calls,
            peek_found: self.peek_found + other.peek_found,
            peek_lru_calls: self.peek_lru_calls + other.peek_lru_calls,
            peek_lru_found: self.peek_lru_found + other.peek_lru_found,
            recency_rank_calls: self.recency_rank_calls + other.recency_rank_calls,
            recency_rank_found: self.recency_rank_found + other.recency_rank_found,
            recency_rank_scan_steps: self.recency_rank_scan_steps
                + other.recency_rank_scan_steps,
            cache_len: self.cache_len + other.cache_len,
            capacity: self.capacity + other.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_zero_calls() {
        assert_eq!(LruMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_is_hits_over_calls() {
        let snapshot = LruMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert!((snapshot.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_adds_counters_and_gauges() {
        let a = LruMetricsSnapshot {
            get_calls: 2,
            evicted_entries: 1,
            cache_len: 3,
            capacity: 4,
            ..Default::default()
        };
        let b = LruMetricsSnapshot {
            get_calls: 5,
            evicted_entries: 2,
            cache_len: 1,
            capacity: 4,
            ..Default::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.get_calls, 7);
        assert_eq!(merged.evicted_entries, 3);
        assert_eq!(merged.cache_len, 4);
        assert_eq!(merged.capacity, 8);
    }
}
