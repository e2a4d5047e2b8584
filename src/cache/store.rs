//! Sharded Cache Module
//!
//! Public cache facade: routes each key to one of a fixed set of shards and
//! owns the background evictor's lifecycle.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use xxhash_rust::xxh3::xxh3_64;

use crate::cache::{Item, Shard};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_evictor, EvictorHandle};

// == Sharded Cache ==
/// In-memory key-value cache partitioned into independently-locked shards.
///
/// Every operation computes the owning shard from the key and acts on that
/// shard's lock alone, so callers touching different keys proceed in parallel.
/// Expiry is enforced lazily on read; a background sweep owned by this cache
/// reclaims the memory of expired items.
///
/// Construction spawns the evictor task and therefore must happen within a
/// Tokio runtime context.
#[derive(Debug)]
pub struct ShardedCache {
    /// Fixed shard array, shared with the evictor task
    shards: Arc<[Shard]>,
    /// TTL applied by `set`
    default_ttl: Duration,
    /// Evictor handle; `None` once `teardown` has consumed it
    evictor: Mutex<Option<EvictorHandle>>,
}

impl ShardedCache {
    // == Constructor ==
    /// Creates a cache with `shard_count` shards and starts the eviction
    /// sweep immediately.
    ///
    /// The shard count is fixed for the cache's lifetime; changing it means
    /// recreating the cache.
    pub fn new(shard_count: usize, default_ttl: Duration, sweep_interval: Duration) -> Self {
        let shard_count = shard_count.max(1);
        let shards: Arc<[Shard]> = (0..shard_count).map(|_| Shard::new()).collect();
        let evictor = spawn_evictor(Arc::clone(&shards), sweep_interval);

        Self {
            shards,
            default_ttl,
            evictor: Mutex::new(Some(evictor)),
        }
    }

    /// Creates a cache from server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.shard_count,
            config.default_ttl_duration(),
            config.sweep_interval_duration(),
        )
    }

    /// Creates a cache with the default shard count, TTL, and sweep interval.
    pub fn with_defaults() -> Self {
        Self::from_config(&Config::default())
    }

    // == Get ==
    /// Retrieves the value for `key`.
    ///
    /// Fails with `NotFound` if the key is absent or its item has expired;
    /// an expired item is logically absent whether or not a sweep has removed
    /// it yet.
    pub fn get(&self, key: &str) -> Result<String> {
        self.shard_for(key)
            .get(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    ///
    /// Infallible: there are no capacity limits and no validation on this
    /// path, so callers never see an error from set.
    pub fn set(&self, key: String, value: String) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    // == Set With TTL ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwrites replace the item wholesale and reset its expiry.
    pub fn set_with_ttl(&self, key: String, value: String, ttl: Duration) {
        let item = Item::new(value, ttl);
        self.shard_for(&key).insert(key, item);
    }

    // == Delete ==
    /// Removes `key` if present; deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) {
        self.shard_for(key).remove(key);
    }

    // == Flush ==
    /// Clears every shard, each under its own exclusive lock in turn.
    ///
    /// Not an atomic snapshot: a concurrent set on a shard that has already
    /// been cleared survives the flush. After flush returns, every key set
    /// before the call is gone.
    pub fn flush(&self) {
        for shard in self.shards.iter() {
            shard.clear();
        }
    }

    // == Teardown ==
    /// Stops the eviction sweep and flushes the cache.
    ///
    /// Idempotent: a second call finds no evictor to stop and re-flushes.
    /// Operations issued after teardown keep working against the flushed
    /// cache, but expired items are only reclaimed lazily from then on.
    pub async fn teardown(&self) {
        let evictor = self.evictor.lock().take();
        if let Some(handle) = evictor {
            handle.stop().await;
        }
        self.flush();
    }

    // == Entry Count ==
    /// Total number of physically present entries across all shards,
    /// including expired items a sweep has not reclaimed yet.
    pub fn entry_count(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Number of shards the key space is partitioned into.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    // == Shard Routing ==
    /// Index of the shard owning `key`.
    ///
    /// A pure function of the key bytes: the same key always routes to the
    /// same shard for the cache's lifetime.
    pub fn shard_index(&self, key: &str) -> usize {
        (xxh3_64(key.as_bytes()) % self.shards.len() as u64) as usize
    }

    fn shard_for(&self, key: &str) -> &Shard {
        &self.shards[self.shard_index(key)]
    }
}
