use std::thread;

use lrukit::CacheBuilder;

fn main() -> Result<(), lrukit::CacheError> {
    let cache = CacheBuilder::<String>::new(64)
        .key_validator(|key| key.starts_with("user:"))
        .build_concurrent::<u64>()?;

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..32u64 {
                    let key = format!("user:{}", worker * 32 + i);
                    if let Err(err) = cache.put(key, i) {
                        eprintln!("put failed: {}", err);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    println!("len: {} / {}", cache.len(), cache.capacity());
    println!("rejected: {}", cache.put("admin".to_string(), 0).is_err());
    Ok(())
}

// Expected output:
// len: 64 / 64
// rejected: true
//
// Explanation: 128 distinct keys go into a 64-entry cache, so it ends full.
// "admin" fails the validator and is refused with InvalidKey.
