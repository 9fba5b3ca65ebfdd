//! In-Memory Strategy
//!
//! Process-local map of entries with lazy expiry on read.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStrategy, CacheValue, Clock, SystemClock};
use crate::error::{CacheError, Result};
use crate::tasks::ExpirySweep;

// == In-Memory Strategy ==
/// Stores entries in a `HashMap` held for the lifetime of the instance.
///
/// Expired entries are treated as absent by `get` but stay in the map until
/// they are overwritten, invalidated or swept.
pub struct InMemoryStrategy {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStrategy {
    /// Creates an empty strategy backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty strategy reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStrategy").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheStrategy for InMemoryStrategy {
    async fn set(&self, key: &str, ttl: u64, data: CacheValue) -> Result<CacheValue> {
        let entry = CacheEntry::new(data.clone(), self.clock.expiry_after(ttl));
        self.entries.write().await.insert(key.to_string(), entry);

        Ok(data)
    }

    async fn get(&self, key: &str) -> Result<CacheValue> {
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired(self.clock.now()) => Ok(entry.data.clone()),
            _ => Err(CacheError::NotFound(key.to_string())),
        }
    }

    async fn invalidate(&self, key: &str) -> Result<String> {
        self.entries.write().await.remove(key);

        Ok(key.to_string())
    }
}

#[async_trait]
impl ExpirySweep for InMemoryStrategy {
    async fn sweep_expired(&self, now: i64) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));

        Ok(before - entries.len())
    }
}
