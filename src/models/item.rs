//! Item Record Module
//!
//! Defines the catalog item as stored in the JSON data file.

use serde::{Deserialize, Serialize};

/// A single catalog item.
///
/// `id` is the stable identity used for change detection; `category` and
/// `description` are absent from some records in the data file and default
/// to empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable item identifier
    pub id: u64,
    /// Display name, searched by the list endpoint
    pub name: String,
    /// Item category
    #[serde(default)]
    pub category: String,
    /// Unit price, never negative
    pub price: f64,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Item {
    /// Creates a new item with the given identity and price.
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            category: String::new(),
            price,
            description: String::new(),
        }
    }
}
