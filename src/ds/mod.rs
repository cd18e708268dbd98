pub mod recency_list;
pub mod shard;
pub mod slot_arena;

pub use recency_list::{RecencyIter, RecencyList};
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
