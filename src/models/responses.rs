//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::Item;

/// Response body for the item list endpoint (GET /api/items)
///
/// `total` counts the filtered collection before pagination so clients can
/// render page controls.
#[derive(Debug, Clone, Serialize)]
pub struct ItemListResponse {
    /// Number of items matching the search filter
    pub total: usize,
    /// The requested page of items
    pub results: Vec<Item>,
}

impl ItemListResponse {
    /// Creates a new ItemListResponse
    pub fn new(total: usize, results: Vec<Item>) -> Self {
        Self { total, results }
    }
}

/// Response body for the stats endpoint (GET /api/stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Number of items in the catalog
    pub total: u64,
    /// Mean price across the catalog, 0 when empty
    pub average_price: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse
    pub fn new(total: u64, average_price: f64) -> Self {
        Self {
            total,
            average_price,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_serialize() {
        let resp = ItemListResponse::new(1, vec![Item::new(1, "Chair", 120.0)]);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"total\":1"));
        assert!(json.contains("Chair"));
    }

    #[test]
    fn test_stats_response_camel_case() {
        let resp = StatsResponse::new(4, 150.5);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"averagePrice\":150.5"));
        assert!(json.contains("\"total\":4"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
