use lrukit::policy::lru::LruCache;

fn show(cache: &LruCache<u32, &'static str>) {
    println!("{}", cache.snapshot());
}

fn main() -> Result<(), lrukit::CacheError> {
    let mut cache = LruCache::new(5)?;

    cache.put(1, "abc")?;
    cache.put(2, "adad")?;
    cache.put(3, "asadad")?;
    println!("get 1: {:?}", cache.get(&1));

    cache.put(4, "asdcscdf")?;
    cache.put(5, "dadacxd")?;
    if let Some((key, value)) = cache.put_evicting(6, "dasasxas")?.into_evicted() {
        println!("evicted {} => {}", key, value);
    }
    cache.put(4, "asdcs")?;

    println!("get 4: {:?}", cache.get(&4));
    println!("get 1: {:?}", cache.get(&1));
    println!("get 5: {:?}", cache.get(&5));

    cache.put(1, "asdada")?;
    show(&cache);
    Ok(())
}

// Expected output:
// get 1: Some("abc")
// evicted 2 => adad
// get 4: Some("asdcs")
// get 1: Some("abc")
// get 5: Some("dadacxd")
// 3-->
// 6-->
// 4-->
// 5-->
// 1-->
// ============
// {3: "asadad", 6: "dasasxas", 4: "asdcs", 5: "dadacxd", 1: "asdada"}
// ============
//
// Explanation: capacity=5; get(1) refreshes key 1, so putting key 6 evicts
// key 2. The final put(1, ..) updates in place and makes 1 most recent.
