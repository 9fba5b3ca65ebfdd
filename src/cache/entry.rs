//! Cache Entry Module
//!
//! Defines the structure for in-memory cache entries with an absolute expiry.

use crate::cache::CacheValue;

// == Cache Entry ==
/// A stored value and the Unix second after which it is no longer served.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored value
    pub data: CacheValue,
    /// Absolute expiry timestamp (Unix seconds)
    pub expires_at: i64,
}

impl CacheEntry {
    pub fn new(data: CacheValue, expires_at: i64) -> Self {
        Self { data, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// An entry is still live during the second it expires at; it only
    /// becomes absent once `now` has moved strictly past `expires_at`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_not_expired_before_deadline() {
        let entry = CacheEntry::new(json!({"foo": "bar"}), 1_300);

        assert!(!entry.is_expired(1_000));
        assert!(!entry.is_expired(1_299));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(json!("v"), 1_300);

        assert!(!entry.is_expired(1_300), "Entry is live at its expiry second");
        assert!(entry.is_expired(1_301));
    }
}
