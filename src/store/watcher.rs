//! Store Watcher Module
//!
//! Watches the item data file for modifications and forwards change events
//! to the stats aggregator. Events whose modification marker is unchanged
//! are dropped so editors and copy tools that rewrite metadata do not
//! trigger spurious recomputes.

use std::time::SystemTime;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::stats::StatsAggregator;
use crate::store::FileStore;

/// Handle to a running store watch.
///
/// Dropping it unregisters the filesystem watch; `stop` shuts down the
/// forwarding task and is safe to call more than once.
pub struct StoreWatcher {
    /// Notify watcher instance, kept alive for the watch registration
    _watcher: RecommendedWatcher,
    /// Shutdown signal
    shutdown_tx: mpsc::Sender<()>,
}

impl StoreWatcher {
    /// Stops the watcher task. Idempotent.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Starts watching the store's data file and wiring changes into the
/// aggregator.
///
/// The parent directory is watched rather than the file itself, since many
/// writers replace the file wholesale; events are filtered back down to the
/// data path.
pub fn spawn_store_watcher(store: FileStore, stats: StatsAggregator) -> Result<StoreWatcher> {
    let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(100);
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.blocking_send(res);
        },
        Config::default(),
    )
    .map_err(|e| CatalogError::Internal(format!("failed to create file watcher: {e}")))?;

    let data_path = store.path().to_path_buf();
    let watch_dir = data_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."))
        .to_path_buf();

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| CatalogError::Internal(format!("failed to watch {}: {e}", watch_dir.display())))?;

    info!(path = %data_path.display(), "Store watcher started");

    tokio::spawn(async move {
        // Marker as of the last processed event
        let mut last_marker = store.modified().ok();

        loop {
            tokio::select! {
                Some(result) = event_rx.recv() => {
                    match result {
                        Ok(event) => {
                            if !touches_data_file(&event, &data_path) {
                                continue;
                            }
                            let current = store.modified().ok();
                            if !marker_changed(last_marker, current) {
                                debug!("Data file event with unchanged mtime, ignoring");
                                continue;
                            }
                            last_marker = current;
                            info!("Data file changed, updating stats");
                            stats.handle_store_change().await;
                        }
                        Err(e) => {
                            warn!(error = %e, "Store watcher error");
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Store watcher shutting down");
                    break;
                }
            }
        }
    });

    Ok(StoreWatcher {
        _watcher: watcher,
        shutdown_tx,
    })
}

/// True when the event is a create/modify touching the data file.
fn touches_data_file(event: &Event, data_path: &std::path::Path) -> bool {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => {}
        _ => return false,
    }
    event.paths.iter().any(|p| p.as_path() == data_path)
}

/// True when the modification marker moved since the last processed event.
///
/// An unreadable marker (file briefly missing mid-replace) counts as a
/// change so the aggregator gets a chance to observe the failure.
fn marker_changed(last: Option<SystemTime>, current: Option<SystemTime>) -> bool {
    match (last, current) {
        (Some(prev), Some(curr)) => prev != curr,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_marker_changed_same_mtime() {
        let t = SystemTime::now();
        assert!(!marker_changed(Some(t), Some(t)));
    }

    #[test]
    fn test_marker_changed_new_mtime() {
        let t = SystemTime::now();
        let later = t + Duration::from_secs(1);
        assert!(marker_changed(Some(t), Some(later)));
    }

    #[test]
    fn test_marker_changed_unreadable() {
        let t = SystemTime::now();
        assert!(marker_changed(Some(t), None));
        assert!(marker_changed(None, Some(t)));
    }

    #[test]
    fn test_touches_data_file_filters_paths() {
        let data_path = PathBuf::from("/srv/data/items.json");
        let event = Event {
            kind: EventKind::Modify(notify::event::ModifyKind::Data(
                notify::event::DataChange::Content,
            )),
            paths: vec![PathBuf::from("/srv/data/other.json")],
            ..Default::default()
        };
        assert!(!touches_data_file(&event, &data_path));

        let event = Event {
            kind: EventKind::Modify(notify::event::ModifyKind::Data(
                notify::event::DataChange::Content,
            )),
            paths: vec![data_path.clone()],
            ..Default::default()
        };
        assert!(touches_data_file(&event, &data_path));
    }

    #[test]
    fn test_touches_data_file_ignores_removal() {
        let data_path = PathBuf::from("/srv/data/items.json");
        let event = Event {
            kind: EventKind::Remove(notify::event::RemoveKind::File),
            paths: vec![data_path.clone()],
            ..Default::default()
        };
        assert!(!touches_data_file(&event, &data_path));
    }
}
