//! Eviction Sweep Task
//!
//! Background task that periodically removes expired cache items.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::Shard;

// == Evictor Handle ==
/// Handle to a running eviction sweep task.
///
/// The task is owned by the cache that spawned it, never shared as ambient
/// global state, so multiple independent caches each get their own evictor.
#[derive(Debug)]
pub struct EvictorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl EvictorHandle {
    /// Signals the task to stop and waits for it to exit.
    ///
    /// Cancellation is cooperative: the signal is observed at the next tick
    /// boundary, and a sweep already in progress is allowed to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

// == Spawn Evictor ==
/// Spawns the background task that sweeps all shards for expired items.
///
/// The task arms a fixed-interval timer and runs one full sweep pass per
/// tick. It holds at most one shard lock at a time, so a slow sweep of one
/// shard never blocks operations on the others.
pub fn spawn_evictor(shards: Arc<[Shard]>, interval: Duration) -> EvictorHandle {
    let (shutdown, mut signal) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs_f64(),
            "eviction sweep task started"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // An interval's first tick completes immediately; consume it so the
        // first sweep happens one full interval after construction.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = sweep(&shards);
                    if removed > 0 {
                        info!(removed, "eviction sweep reclaimed expired entries");
                    } else {
                        debug!("eviction sweep found no expired entries");
                    }
                }
                _ = signal.changed() => {
                    info!("eviction sweep task stopping");
                    break;
                }
            }
        }
    });

    EvictorHandle { shutdown, task }
}

// == Sweep ==
/// Runs one sweep pass over all shards, returning the number of items removed.
///
/// Each shard is processed independently in two phases: collect expired keys
/// under the shared lock, then remove them under the exclusive lock with an
/// expiry re-check. No failure mode exists on this path; anything left behind
/// is picked up by the next tick.
pub fn sweep(shards: &[Shard]) -> usize {
    let mut removed = 0;
    for shard in shards {
        let expired = shard.expired_keys();
        if !expired.is_empty() {
            removed += shard.remove_expired(&expired);
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Item;

    fn make_shards(count: usize) -> Arc<[Shard]> {
        (0..count).map(|_| Shard::new()).collect()
    }

    fn total_entries(shards: &[Shard]) -> usize {
        shards.iter().map(|s| s.len()).sum()
    }

    #[test]
    fn test_sweep_removes_only_expired_items() {
        let shards = make_shards(4);
        shards[0].insert(
            "dead".to_string(),
            Item::new("x".to_string(), Duration::ZERO),
        );
        shards[2].insert(
            "live".to_string(),
            Item::new("y".to_string(), Duration::from_secs(60)),
        );

        let removed = sweep(&shards);

        assert_eq!(removed, 1);
        assert_eq!(total_entries(&shards), 1);
        assert_eq!(shards[2].get("live"), Some("y".to_string()));
    }

    #[tokio::test]
    async fn test_evictor_reclaims_expired_entries() {
        let shards = make_shards(4);
        shards[1].insert(
            "expire_soon".to_string(),
            Item::new("value".to_string(), Duration::from_millis(10)),
        );

        let handle = spawn_evictor(Arc::clone(&shards), Duration::from_millis(50));

        // Wait past the item's TTL and at least one sweep interval.
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(total_entries(&shards), 0, "expired entry should be reclaimed");

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_evictor_preserves_valid_entries() {
        let shards = make_shards(4);
        shards[3].insert(
            "long_lived".to_string(),
            Item::new("value".to_string(), Duration::from_secs(3600)),
        );

        let handle = spawn_evictor(Arc::clone(&shards), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(shards[3].get("long_lived"), Some("value".to_string()));

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_evictor_stop_terminates_task() {
        let shards = make_shards(2);
        let handle = spawn_evictor(shards, Duration::from_secs(3600));

        // Must return promptly even though the next tick is an hour away.
        handle.stop().await;
    }
}
