//! API Module
//!
//! HTTP handlers and routing for the catalog server REST API.
//!
//! # Endpoints
//! - `GET /api/items` - List items with search and pagination
//! - `POST /api/items` - Create a new item
//! - `GET /api/items/:id` - Retrieve a single item
//! - `GET /api/stats` - Get aggregate catalog statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
