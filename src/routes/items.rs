use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, PageRequest, ResultSet, TotalCount};
use crate::app::AppState;
use crate::domain::{CreateItemRequest, Item};
use crate::error::{ApiError, ApiResult};

/// List active items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    paging: PageRequest,
) -> ResultSet<Item> {
    let page = state.catalog.list(false, paging.offset(), paging.limit());

    tracing::info!(
        page = ?paging.page(),
        returned = page.items.len(),
        total = page.total,
        "Listing items"
    );

    ResultSet::new(page.items, page.total as i64)
}

/// List archived items (smaller default page size, see route overrides)
pub async fn list_archived_items(
    State(state): State<Arc<AppState>>,
    paging: PageRequest,
) -> ResultSet<Item> {
    let page = state.catalog.list(true, paging.offset(), paging.limit());
    ResultSet::new(page.items, page.total as i64)
}

/// Bare array of item ids; the total travels as a response extension
pub async fn list_item_ids(
    State(state): State<Arc<AppState>>,
    paging: PageRequest,
) -> (TotalCount, Json<Vec<Uuid>>) {
    let (ids, total) = state.catalog.ids(paging.offset(), paging.limit());
    (TotalCount(total as i64), Json(ids))
}

/// Create a new item
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequest>,
) -> ApiResult<Created<Item>> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Item name must not be empty".to_string()));
    }

    let item = state.catalog.insert(req);
    tracing::info!(item_id = %item.id, name = %item.name, "Created item");

    Ok(Created(item))
}
