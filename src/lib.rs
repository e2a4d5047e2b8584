//! Shardcache - A sharded in-memory cache server
//!
//! Provides a key-value cache partitioned into independently-locked shards,
//! with TTL expiration enforced lazily on read and reclaimed by a background
//! eviction sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ShardedCache;
pub use config::Config;
pub use error::{CacheError, Result};
