//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a cache engine.
//!
//! # Tasks
//! - TTL Sweep: Evicts expired cache entries at a configured interval

mod sweep;

pub(crate) use sweep::SweepHandle;
