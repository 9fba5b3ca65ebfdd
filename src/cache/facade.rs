//! Cache Facade
//!
//! Single entry point used by application code. Adds batch operations and
//! cache-fill on top of whichever strategy it wraps.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::cache::{CacheStrategy, CacheValue};
use crate::error::Result;

// == Cache ==
/// Strategy-agnostic cache facade.
///
/// Holds one strategy for its whole lifetime. Cloning is cheap and clones
/// share the same strategy.
#[derive(Clone)]
pub struct Cache {
    strategy: Arc<dyn CacheStrategy>,
}

impl Cache {
    pub fn new(strategy: Arc<dyn CacheStrategy>) -> Self {
        Self { strategy }
    }

    /// Wraps an owned strategy.
    pub fn from_strategy<S: CacheStrategy>(strategy: S) -> Self {
        Self::new(Arc::new(strategy))
    }

    // == Set ==
    /// Stores `data` under `key` for `ttl` seconds and resolves with `data`.
    pub async fn set(&self, key: &str, ttl: u64, data: CacheValue) -> Result<CacheValue> {
        self.strategy.set(key, ttl, data).await
    }

    // == Multi Set ==
    /// Stores every entry of `data` concurrently and resolves with `data`.
    ///
    /// The first failing write fails the batch. Writes that already landed
    /// are not rolled back.
    pub async fn multi_set(
        &self,
        ttl: u64,
        data: HashMap<String, CacheValue>,
    ) -> Result<HashMap<String, CacheValue>> {
        let writes = data
            .iter()
            .map(|(key, value)| self.set(key, ttl, value.clone()));
        try_join_all(writes).await?;

        Ok(data)
    }

    // == Get ==
    /// Fetches the value for `key`, failing with [`NotFound`](crate::error::CacheError::NotFound) on a miss.
    pub async fn get(&self, key: &str) -> Result<CacheValue> {
        self.strategy.get(key).await
    }

    // == Multi Get ==
    /// Fetches every key concurrently.
    ///
    /// Misses come back as `None`. Any other error fails the whole batch.
    pub async fn multi_get<K: AsRef<str>>(
        &self,
        keys: &[K],
    ) -> Result<HashMap<String, Option<CacheValue>>> {
        let reads = keys.iter().map(|key| async move {
            let key = key.as_ref();
            match self.get(key).await {
                Ok(value) => Ok((key.to_string(), Some(value))),
                Err(e) if e.is_not_found() => Ok((key.to_string(), None)),
                Err(e) => Err(e),
            }
        });

        Ok(try_join_all(reads).await?.into_iter().collect())
    }

    // == Invalidate ==
    /// Removes `key` and resolves with it, whether or not it was present.
    pub async fn invalidate(&self, key: &str) -> Result<String> {
        self.strategy.invalidate(key).await
    }

    // == Multi Invalidate ==
    /// Invalidates every key concurrently; resolves with the keys in input order.
    pub async fn multi_invalidate<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<String>> {
        try_join_all(keys.iter().map(|key| self.invalidate(key.as_ref()))).await
    }

    // == Get Or Set ==
    /// Returns the cached value for `key`, filling it from `fill` on a miss.
    ///
    /// `fill` is only invoked on [`NotFound`](crate::error::CacheError::NotFound);
    /// other errors from the read propagate without calling it. There is no
    /// locking: concurrent misses on the same key each run `fill` and each
    /// write, last write wins.
    pub async fn get_or_set<F, Fut>(&self, key: &str, ttl: u64, fill: F) -> Result<CacheValue>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CacheValue>>,
    {
        match self.strategy.get(key).await {
            Err(e) if e.is_not_found() => {
                debug!(key, ttl, "Cache miss, filling");
                let data = fill().await?;
                self.set(key, ttl, data).await
            }
            other => other,
        }
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}
