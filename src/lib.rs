//! Catalog Server - A lightweight catalog API server
//!
//! Serves a JSON-file-backed item catalog with search, pagination and
//! cached aggregate statistics.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use stats::StatsAggregator;
pub use store::FileStore;
pub use tasks::spawn_refresh_task;
