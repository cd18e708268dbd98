// ==============================================
// LRU MODEL-CHECK PROPERTY TESTS (integration)
// ==============================================
//
// Drives `LruCache` and a naive `VecDeque` reference model with the same
// random operation sequences and requires identical observable behavior.

use std::collections::VecDeque;

use lrukit::prelude::*;
use proptest::prelude::*;

/// Reference LRU: front is least recently used, linear scans everywhere.
#[derive(Debug, Default)]
struct ModelLru {
    capacity: usize,
    entries: VecDeque<(u16, u32)>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    fn position(&self, key: u16) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn get(&mut self, key: u16) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos)?;
        self.entries.push_back(entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u16, value: u32) -> Option<(u16, u32)> {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
            self.entries.push_back((key, value));
            return None;
        }
        self.entries.push_back((key, value));
        if self.entries.len() > self.capacity {
            return self.entries.pop_front();
        }
        None
    }

    fn remove(&mut self, key: u16) -> Option<u32> {
        let pos = self.position(key)?;
        self.entries.remove(pos).map(|(_, v)| v)
    }

    fn keys(&self) -> Vec<u16> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Put(u16, u32),
    Get(u16),
    Peek(u16),
    Remove(u16),
    Touch(u16),
    PopLru,
}

fn op_strategy(key_space: u16) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..key_space, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => (0..key_space).prop_map(Op::Get),
        1 => (0..key_space).prop_map(Op::Peek),
        1 => (0..key_space).prop_map(Op::Remove),
        1 => (0..key_space).prop_map(Op::Touch),
        1 => Just(Op::PopLru),
    ]
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..12,
        ops in prop::collection::vec(op_strategy(24), 0..300)
    ) {
        let mut cache: LruCache<u16, u32> = LruCache::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let evicted = cache.put_evicting(k, v).unwrap().into_evicted();
                    prop_assert_eq!(evicted, model.put(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Peek(k) => {
                    let expected = model.position(k).map(|pos| model.entries[pos].1);
                    prop_assert_eq!(cache.peek(&k).copied(), expected);
                },
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                },
                Op::Touch(k) => {
                    prop_assert_eq!(cache.touch(&k), model.get(k).is_some());
                },
                Op::PopLru => {
                    prop_assert_eq!(cache.pop_lru(), model.entries.pop_front());
                },
            }

            prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.keys());
            prop_assert!(cache.len() <= capacity);
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_accessed_key_is_most_recent(
        capacity in 1usize..12,
        prefill in prop::collection::vec(0u16..32, 1..40),
        pick in any::<prop::sample::Index>()
    ) {
        let mut cache: LruCache<u16, u16> = LruCache::new(capacity).unwrap();
        for k in &prefill {
            cache.put(*k, *k).unwrap();
        }
        let live: Vec<u16> = cache.keys().copied().collect();
        let key = live[pick.index(live.len())];

        prop_assert!(cache.get(&key).is_some());
        prop_assert_eq!(cache.recency_rank(&key), Some(0));
        prop_assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(key));

        // One eviction must not remove it unless the cache holds a single slot.
        cache.put(u16::MAX, 0).unwrap();
        prop_assert_eq!(cache.contains(&key), capacity > 1);
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_reinsert_is_idempotent_on_size(
        capacity in 1usize..12,
        key in 0u16..64,
        v1 in any::<u32>(),
        v2 in any::<u32>(),
        prefill in prop::collection::vec(0u16..64, 0..30)
    ) {
        let mut cache: LruCache<u16, u32> = LruCache::new(capacity).unwrap();
        for k in prefill {
            cache.put(k, 0).unwrap();
        }
        cache.put(key, v1).unwrap();
        let len = cache.len();
        prop_assert_eq!(cache.put(key, v2).unwrap(), Some(v1));
        prop_assert_eq!(cache.len(), len);
        prop_assert_eq!(cache.get(&key), Some(&v2));
    }

    #[cfg(feature = "concurrency")]
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_sharded_never_exceeds_capacity(
        shards in 1usize..6,
        extra in 0usize..20,
        keys in prop::collection::vec(any::<u16>(), 0..200)
    ) {
        let capacity = shards + extra;
        let cache: ShardedLruCache<u16, u16> = ShardedLruCache::new(capacity, shards).unwrap();
        for k in keys {
            cache.put(k, k).unwrap();
            prop_assert!(cache.len() <= capacity);
        }
        prop_assert!(cache.check_invariants().is_ok());
    }
}
