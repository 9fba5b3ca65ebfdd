//! Clock Module
//!
//! Time source used to compute and check absolute expiry timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

// == Clock Trait ==
/// Source of the current Unix time in seconds.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current Unix timestamp in seconds.
    fn now(&self) -> i64;

    /// Returns the absolute expiry timestamp for a TTL starting now.
    fn expiry_after(&self, ttl_seconds: u64) -> i64 {
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        self.now().saturating_add(ttl)
    }
}

// == System Clock ==
/// Wall-clock time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at the given Unix timestamp.
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Creates a clock frozen at the given instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::new(instant.timestamp())
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
