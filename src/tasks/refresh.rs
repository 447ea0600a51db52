//! Stats Refresh Task
//!
//! Background task that periodically recomputes the stats cache when it is
//! absent or past its TTL. Change notifications normally keep the cache
//! current; this timer covers missed or coalesced notifications.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::stats::StatsAggregator;

/// Spawns a background task that keeps the stats cache from going stale.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between checks. A refresh is only triggered when the cache is missing or
/// already older than its TTL, so a healthy change-driven cache costs
/// nothing here.
///
/// # Arguments
/// * `stats` - Aggregator whose cache is kept warm
/// * `interval` - Time between staleness checks, normally the cache TTL
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_refresh_task(stats: StatsAggregator, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting stats refresh task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            if stats.needs_refresh().await {
                debug!("Stats cache missing or stale, refreshing");
                stats.refresh().await;
            } else {
                debug!("Stats cache still fresh, skipping refresh");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::Item;
    use crate::stats::test_util::MemStore;

    #[tokio::test]
    async fn test_refresh_task_warms_missing_cache() {
        let store = Arc::new(MemStore::new(vec![Item::new(1, "a", 100.0)]));
        let stats = StatsAggregator::new(store, Duration::from_secs(300), 5);

        let handle = spawn_refresh_task(stats.clone(), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(stats.full_recompute_count() >= 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_refresh_task_skips_fresh_cache() {
        let store = Arc::new(MemStore::new(vec![Item::new(1, "a", 100.0)]));
        let stats = StatsAggregator::new(store.clone(), Duration::from_secs(300), 5);
        stats.refresh().await;
        let loads_after_warm = store.load_count();

        let handle = spawn_refresh_task(stats.clone(), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(store.load_count(), loads_after_warm);
        assert_eq!(stats.full_recompute_count(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_refresh_task_can_be_aborted() {
        let store = Arc::new(MemStore::new(vec![]));
        let stats = StatsAggregator::new(store, Duration::from_secs(300), 5);

        let handle = spawn_refresh_task(stats, Duration::from_millis(20));

        // Abort immediately
        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
