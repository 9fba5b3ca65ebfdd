//! Store Module
//!
//! The external key-value store consumed by the durable strategy.

mod sled_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::CacheValue;
use crate::error::StoreError;

pub use sled_store::SledStore;

// == Store Item ==
/// Record written to the store for a single cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    pub key: String,
    pub data: CacheValue,
    /// Absolute expiry (Unix seconds), used by the store for its own expiry
    pub ttl: i64,
}

impl StoreItem {
    pub fn new(key: impl Into<String>, data: CacheValue, ttl: i64) -> Self {
        Self {
            key: key.into(),
            data,
            ttl,
        }
    }
}

// == Key-Value Store ==
/// Table-oriented key-value store with its own expiry handling.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Writes `item` to `table`, replacing any record with the same key.
    async fn put(&self, table: &str, item: StoreItem) -> Result<(), StoreError>;

    /// Reads the record for `key`, `None` when the store has no such item.
    async fn get(&self, table: &str, key: &str) -> Result<Option<StoreItem>, StoreError>;

    /// Deletes the record for `key`; deleting a missing key succeeds.
    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError>;
}
