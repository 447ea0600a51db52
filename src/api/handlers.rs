//! API Handlers
//!
//! HTTP request handlers for each catalog server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    CreateItemRequest, HealthResponse, Item, ItemListResponse, ListQuery, StatsResponse,
};
use crate::stats::StatsAggregator;
use crate::store::FileStore;

/// Application state shared across all handlers.
///
/// The file store is read per request; the stats aggregator owns its own
/// cache and is shared between the handlers, the watcher and the refresh
/// task.
#[derive(Clone)]
pub struct AppState {
    /// JSON-file-backed item store
    pub store: FileStore,
    /// Cached aggregate statistics
    pub stats: StatsAggregator,
}

impl AppState {
    /// Creates a new AppState from an existing store and aggregator.
    pub fn new(store: FileStore, stats: StatsAggregator) -> Self {
        Self { store, stats }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store = FileStore::new(&config.data_path);
        let stats = StatsAggregator::new(
            Arc::new(store.clone()),
            config.stats_ttl(),
            config.stats_incremental_threshold,
        );
        Self::new(store, stats)
    }
}

/// Handler for GET /api/items
///
/// Lists items, optionally filtered by a case-insensitive substring match
/// on the name and paginated with limit/offset. The reported total counts
/// the filtered collection, not the returned page.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemListResponse>> {
    let items = state.store.load().await?;

    let filtered: Vec<Item> = match query.q.as_deref() {
        Some(q) if !q.is_empty() => {
            let needle = q.to_lowercase();
            items
                .into_iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .collect()
        }
        _ => items,
    };

    let total = filtered.len();
    let results = filtered
        .into_iter()
        .skip(query.offset.unwrap_or(0))
        .take(query.limit.unwrap_or(usize::MAX))
        .collect();

    Ok(Json(ItemListResponse::new(total, results)))
}

/// Handler for GET /api/items/:id
///
/// Returns a single item or 404.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Item>> {
    let item = state.store.find(id).await?;
    Ok(Json(item))
}

/// Handler for POST /api/items
///
/// Validates the payload, assigns a millisecond-timestamp id and persists
/// the new item. The stats cache catches up through the file watcher.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>)> {
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let item = Item {
        id: chrono::Utc::now().timestamp_millis() as u64,
        name: req.name,
        category: String::new(),
        price: req.price,
        description: req.description,
    };

    let item = state.store.append(item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/stats
///
/// Returns cached aggregate statistics. Staleness never fails the request;
/// only a cold start against an unreadable store surfaces an error.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.stats.stats().await?;
    Ok(Json(StatsResponse::new(stats.total, stats.average_price)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
