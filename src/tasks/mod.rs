//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stats refresh: recomputes the stats cache when it goes missing or
//!   stale, as a safety net for missed change notifications

mod refresh;

pub use refresh::spawn_refresh_task;
