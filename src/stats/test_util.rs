//! In-memory item source for exercising the aggregator without a data file.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CatalogError, Result};
use crate::models::Item;
use crate::store::ItemSource;

/// Item source over an in-memory collection with a toggleable failure mode
/// and a load counter for asserting on I/O behavior.
#[derive(Default)]
pub(crate) struct MemStore {
    items: Mutex<Vec<Item>>,
    fail: AtomicBool,
    loads: AtomicU64,
}

impl MemStore {
    pub(crate) fn new(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            fail: AtomicBool::new(false),
            loads: AtomicU64::new(0),
        }
    }

    /// Replaces the stored collection, simulating an out-of-band mutation.
    pub(crate) fn set_items(&self, items: Vec<Item>) {
        *self.items.lock().unwrap() = items;
    }

    /// Makes subsequent loads fail with an I/O error.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Number of loads performed so far.
    pub(crate) fn load_count(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSource for MemStore {
    async fn load(&self) -> Result<Vec<Item>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated read failure",
            )));
        }
        Ok(self.items.lock().unwrap().clone())
    }
}
