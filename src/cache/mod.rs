//! Cache Module
//!
//! Sharded in-memory caching with TTL expiration and background eviction.

mod item;
mod shard;
mod store;


// Re-export public types
pub use item::Item;
pub use shard::Shard;
pub use store::ShardedCache;
