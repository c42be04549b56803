pub mod health;
pub mod items;
pub mod tags;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Not a list; excluded from pagination
        .route("/health", get(health::health_check))
        // Items
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/archived", get(items::list_archived_items))
        .route("/items/ids", get(items::list_item_ids))
        // Tags (excluded, returned as a bare array)
        .route("/tags", get(tags::list_tags))
}
