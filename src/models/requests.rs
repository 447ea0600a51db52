//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for item creation (POST /api/items)
///
/// # Fields
/// - `name`: Display name of the new item (required, non-empty)
/// - `price`: Unit price (required, non-negative)
/// - `description`: Optional free-form description
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Optional description
    #[serde(default)]
    pub description: String,
}

impl CreateItemRequest {
    /// Validates the request data.
    ///
    /// Returns an error message listing every failed rule, None if valid.
    pub fn validate(&self) -> Option<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Name is required");
        }
        if !self.price.is_finite() {
            errors.push("Price must be a number");
        } else if self.price < 0.0 {
            errors.push("Price cannot be negative");
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        }
    }
}

/// Query parameters for the item list endpoint (GET /api/items)
///
/// Search is applied before pagination, so `total` in the response reflects
/// the filtered collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring match against item names
    pub q: Option<String>,
    /// Maximum number of results to return
    pub limit: Option<usize>,
    /// Number of results to skip
    pub offset: Option<usize>,
}
