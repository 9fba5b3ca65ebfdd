//! Strategy Module
//!
//! The storage capability every cache backend implements.

use async_trait::async_trait;

use crate::cache::CacheValue;
use crate::error::{CacheError, Result};

// == Cache Strategy ==
/// Storage backend behind the [`Cache`](crate::cache::Cache) facade.
///
/// Implementations must honour the following contract:
/// - `set` overwrites any existing entry and resolves with the data it was given.
/// - `get` fails with [`CacheError::NotFound`] when there is no live entry.
/// - `invalidate` resolves with the key whether or not an entry existed.
#[async_trait]
pub trait CacheStrategy: Send + Sync + 'static {
    /// Stores `data` under `key` for `ttl` seconds.
    async fn set(&self, key: &str, ttl: u64, data: CacheValue) -> Result<CacheValue>;

    /// Fetches the live value stored under `key`.
    async fn get(&self, key: &str) -> Result<CacheValue>;

    /// Removes any entry stored under `key`.
    async fn invalidate(&self, key: &str) -> Result<String>;
}

// == Unimplemented Strategy ==
/// Placeholder strategy that rejects every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedStrategy;

#[async_trait]
impl CacheStrategy for UnimplementedStrategy {
    async fn set(&self, _key: &str, _ttl: u64, _data: CacheValue) -> Result<CacheValue> {
        Err(CacheError::Unsupported { method: "set" })
    }

    async fn get(&self, _key: &str) -> Result<CacheValue> {
        Err(CacheError::Unsupported { method: "get" })
    }

    async fn invalidate(&self, _key: &str) -> Result<String> {
        Err(CacheError::Unsupported { method: "invalidate" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unimplemented_strategy_rejects_all_calls() {
        let strategy = UnimplementedStrategy;

        let set = strategy.set("key", 300, json!(1)).await;
        assert!(matches!(set, Err(CacheError::Unsupported { method: "set" })));

        let get = strategy.get("key").await;
        assert!(matches!(get, Err(CacheError::Unsupported { method: "get" })));

        let invalidate = strategy.invalidate("key").await;
        assert!(matches!(
            invalidate,
            Err(CacheError::Unsupported { method: "invalidate" })
        ));
    }
}
