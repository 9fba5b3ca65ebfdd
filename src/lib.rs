//! Strategy Cache - a TTL cache facade over interchangeable storage strategies
//!
//! Provides a [`Cache`] facade with batch and get-or-set operations, an
//! in-memory strategy with lazy expiry and a durable strategy on top of an
//! external key-value store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheStrategy, CacheValue, DurableStrategy, InMemoryStrategy};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
