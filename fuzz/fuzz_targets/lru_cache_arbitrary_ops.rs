#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::{LruCache, PutOutcome};

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; the rest are (op, key) pairs. Checks the
// capacity bound, MRU placement after put/get, and index/list agreement.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity).unwrap();
    let mut counter = 0u32;

    for chunk in ops.chunks_exact(2) {
        let key = chunk[1] % 32;
        counter += 1;

        match chunk[0] % 7 {
            0 | 1 => {
                let was_full = cache.len() == capacity;
                let had_key = cache.contains(&key);
                match cache.put_evicting(key, counter).unwrap() {
                    PutOutcome::Inserted => assert!(!had_key && !was_full),
                    PutOutcome::Updated(_) => assert!(had_key),
                    PutOutcome::Evicted(victim, _) => {
                        assert!(!had_key && was_full);
                        assert_ne!(victim, key);
                    },
                }
                assert_eq!(cache.recency_rank(&key), Some(0));
                assert_eq!(cache.peek(&key), Some(&counter));
            },
            2 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            3 => {
                let before: Vec<u8> = cache.keys().copied().collect();
                cache.peek(&key);
                assert!(cache.keys().copied().eq(before));
            },
            4 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            },
            5 => {
                let expected = cache.peek_lru().map(|(k, _)| *k);
                assert_eq!(cache.pop_lru().map(|(k, _)| k), expected);
            },
            _ => {
                cache.touch(&key);
            },
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
});
