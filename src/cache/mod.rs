//! Cache Module
//!
//! The cache facade, the strategy capability it delegates to, and the two
//! strategies shipped with the crate.

mod clock;
mod durable;
mod entry;
mod facade;
mod memory;
mod strategy;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use durable::DurableStrategy;
pub use entry::CacheEntry;
pub use facade::Cache;
pub use memory::InMemoryStrategy;
pub use strategy::{CacheStrategy, UnimplementedStrategy};

/// Opaque structured payload stored in the cache.
pub type CacheValue = serde_json::Value;
