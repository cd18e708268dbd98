use std::hint::black_box;
#[cfg(feature = "concurrency")]
use std::sync::Arc;
#[cfg(feature = "concurrency")]
use std::thread;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;
#[cfg(feature = "concurrency")]
use lrukit::policy::lru::ConcurrentLruCache;
#[cfg(feature = "concurrency")]
use lrukit::policy::sharded::ShardedLruCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn filled(capacity: usize) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity).expect("non-zero capacity");
    for i in 0..capacity as u64 {
        cache.put(i, i).expect("no validator");
    }
    cache
}

/// Keys drawn mostly from a small hot set, the rest uniformly from a wide range.
fn skewed_keys(n: usize, hot: u64, cold: u64, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            if rng.random_bool(0.8) {
                rng.random_range(0..hot)
            } else {
                rng.random_range(0..cold)
            }
        })
        .collect()
}

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(black_box(i + 10_000), i).expect("no validator");
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_get_hit");
    for capacity in [64usize, 1024, 16_384] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            let mut cache = filled(cap);
            let mut key = 0u64;
            b.iter(|| {
                key = (key + 7) % cap as u64;
                black_box(cache.get(&key).copied())
            });
        });
    }
    group.finish();
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = black_box(cache.put_evicting(black_box(10_000 + i), i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_skewed_workload(c: &mut Criterion) {
    let keys = skewed_keys(10_000, 256, 100_000, 42);
    c.bench_function("lru_skewed_workload", |b| {
        b.iter_batched(
            || LruCache::<u64, u64>::new(1024).expect("non-zero capacity"),
            |mut cache| {
                for &key in &keys {
                    if cache.get(&key).is_none() {
                        cache.put(key, key).expect("no validator");
                    }
                }
                black_box(cache.len())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_recency_ops(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || filled(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = black_box(cache.touch(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                while let Some(entry) = cache.pop_lru() {
                    let _ = black_box(entry);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

#[cfg(feature = "concurrency")]
fn bench_concurrent(c: &mut Criterion) {
    const THREADS: u64 = 4;
    const OPS: u64 = 5_000;

    let mut group = c.benchmark_group("concurrent_put_get");
    group.bench_function("rwlock", |b| {
        b.iter(|| {
            let cache: ConcurrentLruCache<u64, u64> =
                ConcurrentLruCache::new(4096).expect("non-zero capacity");
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let cache = cache.clone();
                    thread::spawn(move || {
                        for i in 0..OPS {
                            let key = (t * OPS + i) % 8192;
                            cache.put(key, i).expect("no validator");
                            let _ = black_box(cache.get(&(key / 2)));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("bench thread panicked");
            }
        })
    });
    group.bench_function("sharded_16", |b| {
        b.iter(|| {
            let cache: Arc<ShardedLruCache<u64, u64>> =
                Arc::new(ShardedLruCache::new(4096, 16).expect("valid shard config"));
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let cache = Arc::clone(&cache);
                    thread::spawn(move || {
                        for i in 0..OPS {
                            let key = (t * OPS + i) % 8192;
                            cache.put(key, i).expect("no validator");
                            let _ = black_box(cache.get(&(key / 2)));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("bench thread panicked");
            }
        })
    });
    group.finish();
}

#[cfg(not(feature = "concurrency"))]
fn bench_concurrent(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_lru_put_get,
    bench_lru_get_hit,
    bench_lru_eviction_churn,
    bench_lru_skewed_workload,
    bench_lru_recency_ops,
    bench_concurrent
);
criterion_main!(benches);
