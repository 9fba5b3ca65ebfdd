//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes expired entries from a strategy or store

mod sweep;

pub use sweep::{spawn_sweep_task, ExpirySweep};
