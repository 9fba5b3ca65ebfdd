//! Expiry Sweep Task
//!
//! Background task that periodically removes expired entries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Clock;
use crate::config::MIN_SWEEP_INTERVAL;
use crate::error::Result;

// == Expiry Sweep ==
/// Something holding entries that can be purged once their expiry has passed.
#[async_trait]
pub trait ExpirySweep: Send + Sync + 'static {
    /// Removes every entry whose expiry is strictly before `now`.
    ///
    /// Returns the number of entries removed.
    async fn sweep_expired(&self, now: i64) -> Result<usize>;
}

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. A failed sweep is logged and retried on the next tick.
///
/// # Arguments
/// * `target` - The strategy or store to sweep
/// * `clock` - Time source used to decide what has expired
/// * `interval_secs` - Interval in seconds between sweeps, raised to at least 1
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let strategy = Arc::new(InMemoryStrategy::new());
/// let sweep_handle = spawn_sweep_task(strategy.clone(), Arc::new(SystemClock), 60);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(
    target: Arc<dyn ExpirySweep>,
    clock: Arc<dyn Clock>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval_secs = interval_secs.max(MIN_SWEEP_INTERVAL);
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match target.sweep_expired(clock.now()).await {
                Ok(0) => debug!("Expiry sweep: no expired entries found"),
                Ok(removed) => info!("Expiry sweep: removed {} expired entries", removed),
                Err(e) => warn!("Expiry sweep failed: {}", e),
            }
        }
    })
}
