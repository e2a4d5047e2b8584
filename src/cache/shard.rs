//! Cache Shard Module
//!
//! An independently-lockable partition of the key space.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cache::Item;

// == Shard ==
/// One partition of the key space, guarded by its own reader/writer lock.
///
/// All operations touch exactly this shard's lock and nothing else, so two
/// operations on different shards never contend. Alignment padding keeps
/// neighbouring shards off the same cache line.
#[derive(Debug, Default)]
#[repr(align(64))]
pub struct Shard {
    entries: RwLock<HashMap<String, Item>>,
}

impl Shard {
    /// Creates an empty shard.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Looks up `key` under the shared lock.
    ///
    /// An item past its expiry is treated as absent even if it has not been
    /// physically removed yet (lazy expiry).
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(item) if !item.is_expired() => Some(item.value().to_string()),
            _ => None,
        }
    }

    // == Insert ==
    /// Inserts or overwrites `key` under the exclusive lock.
    pub fn insert(&self, key: String, item: Item) {
        self.entries.write().insert(key, item);
    }

    // == Remove ==
    /// Removes `key` under the exclusive lock; absent keys are a no-op.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    // == Clear ==
    /// Removes every entry under the exclusive lock.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    // == Expired Keys ==
    /// Collects the keys of all currently-expired items under the shared lock.
    ///
    /// Used by the eviction sweep's scan phase so that readers and writers on
    /// this shard are only briefly excluded during the actual removals.
    pub fn expired_keys(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|(_, item)| item.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove Expired ==
    /// Removes the given keys under the exclusive lock, re-checking expiry.
    ///
    /// A key overwritten between the scan phase and this call is live again
    /// and must survive. Returns the number of entries actually removed.
    pub fn remove_expired(&self, keys: &[String]) -> usize {
        let mut entries = self.entries.write();
        let mut removed = 0;
        for key in keys {
            if entries.get(key).is_some_and(|item| item.is_expired()) {
                entries.remove(key);
                removed += 1;
            }
        }
        removed
    }

    // == Length ==
    /// Number of physically present entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the shard holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_shard_insert_and_get() {
        let shard = Shard::new();
        shard.insert(
            "key".to_string(),
            Item::new("value".to_string(), Duration::from_secs(60)),
        );

        assert_eq!(shard.get("key"), Some("value".to_string()));
        assert_eq!(shard.len(), 1);
    }

    #[test]
    fn test_shard_get_missing() {
        let shard = Shard::new();
        assert_eq!(shard.get("missing"), None);
    }

    #[test]
    fn test_shard_expired_item_is_invisible_but_present() {
        let shard = Shard::new();
        shard.insert(
            "key".to_string(),
            Item::new("value".to_string(), Duration::from_millis(5)),
        );
        sleep(Duration::from_millis(15));

        // Logically absent, physically still there until a sweep runs.
        assert_eq!(shard.get("key"), None);
        assert_eq!(shard.len(), 1);
    }

    #[test]
    fn test_shard_remove_is_noop_when_absent() {
        let shard = Shard::new();
        shard.remove("missing");
        assert!(shard.is_empty());
    }

    #[test]
    fn test_shard_clear() {
        let shard = Shard::new();
        shard.insert(
            "a".to_string(),
            Item::new("1".to_string(), Duration::from_secs(60)),
        );
        shard.insert(
            "b".to_string(),
            Item::new("2".to_string(), Duration::from_secs(60)),
        );

        shard.clear();
        assert!(shard.is_empty());
    }

    #[test]
    fn test_shard_expired_keys_and_remove_expired() {
        let shard = Shard::new();
        shard.insert(
            "dead".to_string(),
            Item::new("x".to_string(), Duration::from_millis(5)),
        );
        shard.insert(
            "live".to_string(),
            Item::new("y".to_string(), Duration::from_secs(60)),
        );
        sleep(Duration::from_millis(15));

        let expired = shard.expired_keys();
        assert_eq!(expired, vec!["dead".to_string()]);

        let removed = shard.remove_expired(&expired);
        assert_eq!(removed, 1);
        assert_eq!(shard.len(), 1);
        assert_eq!(shard.get("live"), Some("y".to_string()));
    }

    #[test]
    fn test_shard_remove_expired_spares_overwritten_key() {
        let shard = Shard::new();
        shard.insert(
            "key".to_string(),
            Item::new("old".to_string(), Duration::from_millis(5)),
        );
        sleep(Duration::from_millis(15));

        let expired = shard.expired_keys();
        assert_eq!(expired.len(), 1);

        // Overwrite between the scan and delete phases of a sweep.
        shard.insert(
            "key".to_string(),
            Item::new("new".to_string(), Duration::from_secs(60)),
        );

        let removed = shard.remove_expired(&expired);
        assert_eq!(removed, 0);
        assert_eq!(shard.get("key"), Some("new".to_string()));
    }
}
