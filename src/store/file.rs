//! File Store Module
//!
//! JSON-file-backed item storage. The whole catalog lives in one file that
//! is read per request and rewritten on mutation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::{CatalogError, Result};
use crate::models::Item;
use crate::store::ItemSource;

// == File Store ==
/// Item storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the items JSON file
    path: PathBuf,
}

impl FileStore {
    // == Constructor ==
    /// Creates a new FileStore reading from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the underlying data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Load ==
    /// Reads and parses the full item collection.
    pub async fn load(&self) -> Result<Vec<Item>> {
        let raw = tokio::fs::read(&self.path).await?;
        let items = serde_json::from_slice(&raw)?;
        Ok(items)
    }

    // == Save ==
    /// Rewrites the data file with the given collection.
    ///
    /// Pretty-printed to keep the file hand-editable.
    pub async fn save(&self, items: &[Item]) -> Result<()> {
        let raw = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    // == Append ==
    /// Appends a new item to the collection and persists it.
    pub async fn append(&self, item: Item) -> Result<Item> {
        let mut items = self.load().await?;
        items.push(item.clone());
        self.save(&items).await?;
        Ok(item)
    }

    // == Find ==
    /// Looks up a single item by id.
    pub async fn find(&self, id: u64) -> Result<Item> {
        let items = self.load().await?;
        items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    // == Modification Marker ==
    /// Returns the file's modification time.
    ///
    /// Used by the watcher to distinguish real content changes from
    /// spurious filesystem events.
    pub fn modified(&self) -> Result<SystemTime> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        Ok(modified)
    }
}

#[async_trait]
impl ItemSource for FileStore {
    async fn load(&self) -> Result<Vec<Item>> {
        FileStore::load(self).await
    }
}
