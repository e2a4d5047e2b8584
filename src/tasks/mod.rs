//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Eviction sweep: reclaims expired cache items at a fixed interval

mod evictor;

pub use evictor::{spawn_evictor, sweep, EvictorHandle};
