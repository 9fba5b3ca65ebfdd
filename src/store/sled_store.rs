//! Sled Store
//!
//! Durable key-value store on top of sled, one tree per table.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::store::{KeyValueStore, StoreItem};
use crate::tasks::ExpirySweep;

const DEFAULT_TREE: &[u8] = b"__sled__default";

/// Sled-backed table store.
///
/// Items are JSON-encoded. Records whose `ttl` has passed are removed by the
/// background sweep, never on read.
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Opens (or creates) a database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("Failed to create directory: {}", e))
            })?;
        }

        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Opens a database that is deleted when dropped.
    pub fn temporary() -> std::result::Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    fn table(&self, table: &str) -> std::result::Result<sled::Tree, StoreError> {
        Ok(self.db.open_tree(table)?)
    }
}

#[async_trait]
impl KeyValueStore for SledStore {
    async fn put(&self, table: &str, item: StoreItem) -> std::result::Result<(), StoreError> {
        let tree = self.table(table)?;
        let value = serde_json::to_vec(&item)?;

        tree.insert(item.key.as_bytes(), value)?;
        tree.flush_async().await?;

        Ok(())
    }

    async fn get(
        &self,
        table: &str,
        key: &str,
    ) -> std::result::Result<Option<StoreItem>, StoreError> {
        let tree = self.table(table)?;

        match tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, table: &str, key: &str) -> std::result::Result<(), StoreError> {
        let tree = self.table(table)?;

        tree.remove(key.as_bytes())?;
        tree.flush_async().await?;

        Ok(())
    }
}

#[async_trait]
impl ExpirySweep for SledStore {
    async fn sweep_expired(&self, now: i64) -> Result<usize> {
        let mut removed = 0;

        for name in self.db.tree_names() {
            if name.as_ref() == DEFAULT_TREE {
                continue;
            }

            let tree = self.db.open_tree(&name).map_err(StoreError::from)?;
            let mut swept = 0;

            for record in tree.iter() {
                let (key, value) = record.map_err(StoreError::from)?;
                let item: StoreItem = match serde_json::from_slice(&value) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(
                            table = %String::from_utf8_lossy(&name),
                            key = %String::from_utf8_lossy(&key),
                            "Skipping undecodable record during sweep: {}",
                            e
                        );
                        continue;
                    }
                };

                if item.ttl >= now {
                    continue;
                }

                // Skip records rewritten since they were read.
                let swapped = tree
                    .compare_and_swap(&key, Some(&value), None::<sled::IVec>)
                    .map_err(StoreError::from)?;
                if swapped.is_ok() {
                    swept += 1;
                }
            }

            if swept > 0 {
                tree.flush_async().await.map_err(StoreError::from)?;
            }
            debug!(table = %String::from_utf8_lossy(&name), swept, "Swept sled table");
            removed += swept;
        }

        Ok(removed)
    }
}
