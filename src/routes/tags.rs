use axum::{extract::State, Json};
use std::sync::Arc;

use crate::app::AppState;

/// All tags in use. Excluded from pagination, so always a bare array.
pub async fn list_tags(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.catalog.tags())
}
