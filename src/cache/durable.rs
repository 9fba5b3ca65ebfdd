//! Durable Strategy
//!
//! Stores entries in an external key-value store and leaves expiry to it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{CacheStrategy, CacheValue, Clock, SystemClock};
use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoreItem};

/// Strategy backed by a [`KeyValueStore`] table.
///
/// Each entry is written with an absolute `ttl` attribute which the store is
/// expected to act on. Reads do not check it.
pub struct DurableStrategy {
    store: Arc<dyn KeyValueStore>,
    table: String,
    clock: Arc<dyn Clock>,
}

impl DurableStrategy {
    pub fn new(store: Arc<dyn KeyValueStore>, table: impl Into<String>) -> Self {
        Self::with_clock(store, table, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        table: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            clock,
        }
    }
}

impl fmt::Debug for DurableStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurableStrategy")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheStrategy for DurableStrategy {
    async fn set(&self, key: &str, ttl: u64, data: CacheValue) -> Result<CacheValue> {
        let item = StoreItem::new(key, data.clone(), self.clock.expiry_after(ttl));
        self.store.put(&self.table, item).await?;

        Ok(data)
    }

    async fn get(&self, key: &str) -> Result<CacheValue> {
        match self.store.get(&self.table, key).await? {
            Some(item) => Ok(item.data),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    async fn invalidate(&self, key: &str) -> Result<String> {
        self.store.delete(&self.table, key).await?;

        Ok(key.to_string())
    }
}
