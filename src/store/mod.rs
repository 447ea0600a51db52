//! Item Store Module
//!
//! File-backed persistence for the item catalog plus change detection.

mod file;
mod watcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Item;

pub use file::FileStore;
pub use watcher::{spawn_store_watcher, StoreWatcher};

/// Read-only source of the full item collection.
///
/// The stats aggregator depends on this seam rather than on the file store
/// directly, so tests can drive it with an in-memory collection.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Loads the entire item collection.
    async fn load(&self) -> Result<Vec<Item>>;
}
