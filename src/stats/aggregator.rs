//! Stats Aggregator Module
//!
//! Owns the cached aggregate stats, the running totals and the previous
//! snapshot, and decides between incremental updates and full recomputes
//! when the store changes.
//!
//! The contract favors availability over freshness: once any value has been
//! computed, `stats` never blocks a caller on a refresh.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::Item;
use crate::stats::{AggregateStats, ItemDelta, RunningTotals};
use crate::store::ItemSource;

// == Cache Entry ==
/// A computed aggregate and the instant it was last known to exactly match
/// the store's collection.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    value: AggregateStats,
    computed_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.computed_at.elapsed() < ttl
    }
}

// == Aggregator State ==
/// Mutable aggregator state, guarded by a single lock so incremental
/// applies and full recomputes cannot interleave.
#[derive(Default)]
struct AggregatorState {
    cache: Option<CacheEntry>,
    totals: RunningTotals,
    previous: Option<Vec<Item>>,
}

// == Stats Aggregator ==
/// Produces aggregate stats without rescanning the catalog on every
/// request, tolerating out-of-band mutations of the backing store.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn ItemSource>,
    ttl: Duration,
    incremental_threshold: usize,
    state: Arc<Mutex<AggregatorState>>,
    /// Collapses concurrent background refreshes into one in-flight run
    warming: Arc<AtomicBool>,
    full_recomputes: Arc<AtomicU64>,
    incremental_updates: Arc<AtomicU64>,
}

impl StatsAggregator {
    // == Constructor ==
    /// Creates a new aggregator over the given item source.
    ///
    /// # Arguments
    /// * `store` - Source of the item collection
    /// * `ttl` - How long a computed value is served without refresh
    /// * `incremental_threshold` - Largest change batch absorbed incrementally
    pub fn new(store: Arc<dyn ItemSource>, ttl: Duration, incremental_threshold: usize) -> Self {
        Self {
            store,
            ttl,
            incremental_threshold,
            state: Arc::new(Mutex::new(AggregatorState::default())),
            warming: Arc::new(AtomicBool::new(false)),
            full_recomputes: Arc::new(AtomicU64::new(0)),
            incremental_updates: Arc::new(AtomicU64::new(0)),
        }
    }

    // == Query ==
    /// Returns the current aggregate stats.
    ///
    /// A fresh cached value is returned as-is. An expired one is returned
    /// immediately while a background refresh is triggered. Only when no
    /// value has ever been computed does this read the store synchronously,
    /// and only then can a store failure reach the caller.
    pub async fn stats(&self) -> Result<AggregateStats> {
        let cached = {
            let state = self.state.lock().await;
            state.cache.map(|entry| (entry.value, entry.is_fresh(self.ttl)))
        };

        match cached {
            Some((value, true)) => Ok(value),
            Some((value, false)) => {
                // Stale: serve it rather than making the caller wait
                self.spawn_refresh();
                Ok(value)
            }
            None => self.recompute_full().await,
        }
    }

    /// True when the cache is absent or past its TTL.
    pub async fn needs_refresh(&self) -> bool {
        let state = self.state.lock().await;
        match &state.cache {
            Some(entry) => !entry.is_fresh(self.ttl),
            None => true,
        }
    }

    // == Full Recompute ==
    /// Recomputes the cache from the full collection, logging failures.
    ///
    /// If a refresh is already in flight this is a no-op; callers that need
    /// a value re-poll `stats`.
    pub async fn refresh(&self) {
        if self.warming.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(err) = self.recompute_full().await {
            warn!(error = %err, "Stats refresh failed");
        }
        self.warming.store(false, Ordering::SeqCst);
    }

    fn spawn_refresh(&self) {
        let aggregator = self.clone();
        tokio::spawn(async move {
            aggregator.refresh().await;
        });
    }

    /// Reads the full collection and overwrites totals, cache and snapshot.
    ///
    /// The store read happens under the state lock, so a concurrent
    /// incremental apply cannot interleave with the overwrite. On failure
    /// the prior state is left untouched.
    async fn recompute_full(&self) -> Result<AggregateStats> {
        let mut state = self.state.lock().await;
        let items = self.store.load().await?;

        state.totals = RunningTotals::from_items(&items);
        let value = state.totals.aggregate();
        state.cache = Some(CacheEntry {
            value,
            computed_at: Instant::now(),
        });
        state.previous = Some(items);
        self.full_recomputes.fetch_add(1, Ordering::Relaxed);

        debug!(total = value.total, "Stats cache recomputed from scratch");
        Ok(value)
    }

    // == Change Handling ==
    /// Processes a store-change notification.
    ///
    /// Small diffs against the previous snapshot are applied to the running
    /// totals; anything larger, or any state the totals cannot patch, falls
    /// back to a full recompute. A read failure invalidates the cache before
    /// the recovery attempt so a stale value is never served as fresh.
    pub async fn handle_store_change(&self) {
        let items = match self.store.load().await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "Failed to reload items after change, invalidating stats cache");
                self.state.lock().await.cache = None;
                self.refresh().await;
                return;
            }
        };

        let mut state = self.state.lock().await;

        // First change since startup, or totals never seeded: full scan only
        if state.previous.is_none() || !state.totals.initialized {
            drop(state);
            self.refresh().await;
            return;
        }

        let delta = ItemDelta::between(state.previous.as_deref().unwrap_or(&[]), &items);

        if delta.is_empty() {
            // Content matches the snapshot; totals and cache already exact
            state.previous = Some(items);
            return;
        }

        if delta.len() > self.incremental_threshold {
            info!(
                changes = delta.len(),
                "Change batch exceeds incremental threshold, performing full recompute"
            );
            drop(state);
            self.refresh().await;
            return;
        }

        info!(
            added = delta.added.len(),
            removed = delta.removed.len(),
            modified = delta.modified.len(),
            "Applying incremental stats update"
        );

        // Removals first, then additions, then price changes
        for item in &delta.removed {
            state.totals.remove(item);
        }
        for item in &delta.added {
            state.totals.add(item);
        }
        for (old, new) in &delta.modified {
            state.totals.modify(old, new);
        }

        let value = state.totals.aggregate();
        state.cache = Some(CacheEntry {
            value,
            computed_at: Instant::now(),
        });
        state.previous = Some(items);
        self.incremental_updates.fetch_add(1, Ordering::Relaxed);
    }

    // == Counters ==
    /// Number of completed full recomputes.
    pub fn full_recompute_count(&self) -> u64 {
        self.full_recomputes.load(Ordering::Relaxed)
    }

    /// Number of applied incremental updates.
    pub fn incremental_update_count(&self) -> u64 {
        self.incremental_updates.load(Ordering::Relaxed)
    }
}
