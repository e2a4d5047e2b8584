//! Cache Item Module
//!
//! Defines the structure for individual cache items with TTL support.

use std::time::{Duration, Instant};

// == Cache Item ==
/// A single cached value together with its absolute expiry time.
///
/// Items are immutable once created: an overwrite replaces the whole item
/// rather than mutating it in place.
#[derive(Debug, Clone)]
pub struct Item {
    value: String,
    expires_at: Instant,
}

impl Item {
    // == Constructor ==
    /// Creates a new item expiring `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Returns a reference to the stored value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the item and returns the stored value.
    pub fn into_value(self) -> String {
        self.value
    }

    // == Is Expired ==
    /// Checks whether the item has expired.
    ///
    /// This is a pure comparison of `expires_at` against the current time at
    /// the moment of the call; nothing is cached or precomputed. An item whose
    /// TTL has fully elapsed (`now >= expires_at`) is expired.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Absolute expiry time of this item.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_item_not_expired_with_future_ttl() {
        let item = Item::new("value".to_string(), Duration::from_secs(60));

        assert_eq!(item.value(), "value");
        assert!(!item.is_expired());
        assert!(item.expires_at() > Instant::now());
    }

    #[test]
    fn test_item_expires_after_ttl() {
        let item = Item::new("value".to_string(), Duration::from_millis(10));

        assert!(!item.is_expired());
        sleep(Duration::from_millis(20));
        assert!(item.is_expired());
    }

    #[test]
    fn test_item_zero_ttl_is_expired() {
        // now >= expires_at at the boundary
        let item = Item::new("value".to_string(), Duration::ZERO);
        assert!(item.is_expired());
    }

    #[test]
    fn test_item_into_value() {
        let item = Item::new("payload".to_string(), Duration::from_secs(1));
        assert_eq!(item.into_value(), "payload");
    }
}
