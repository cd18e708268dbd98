pub mod lru;
#[cfg(feature = "concurrency")]
pub mod sharded;
