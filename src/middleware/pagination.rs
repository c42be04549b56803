//! Pagination middleware
//!
//! Runs the normalizer before the handler and the enveloper after it.
//! Install it with `route_layer` so it only wraps declared method endpoints;
//! 404 and 405 fallbacks then never reach it and the request method equals
//! the route's declared method:
//!
//! ```ignore
//! Router::new()
//!     .route("/items", get(list_items))
//!     .route_layer(middleware::from_fn_with_state(config, paginate))
//! ```

use anyhow::Context;
use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        uri::PathAndQuery,
        HeaderValue, StatusCode, Uri,
    },
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use std::sync::Arc;

use crate::api::TotalCount;
use crate::error::{ApiError, ApiResult};
use crate::pagination::{
    envelope, normalize, NormalizedQuery, PaginationConfig, PaginationError, QueryMap, RouteInfo,
};

pub async fn paginate(
    State(config): State<Arc<PaginationConfig>>,
    matched_path: Option<MatchedPath>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    // No declared route (404 fallback): nothing to paginate
    let Some(matched_path) = matched_path else {
        return Ok(next.run(req).await);
    };
    let route = RouteInfo::new(req.method().clone(), matched_path.as_str());

    let query = QueryMap::parse(req.uri().query());
    let Some(normalized) = normalize(&route, query, &config)? else {
        tracing::trace!(method = %route.method, route = %route.path, "Route not paginated");
        return Ok(next.run(req).await);
    };

    tracing::debug!(
        route = %route.path,
        paging = ?normalized.paging,
        "Normalized pagination query"
    );

    rewrite_query(req.uri_mut(), &normalized.params)?;
    req.extensions_mut().insert(normalized.paging);
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if !should_envelope(response.status(), &normalized) {
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    let stashed_total = parts.extensions.get::<TotalCount>().map(|t| t.0);
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .context("Failed to read list response body")?;

    let enveloped = serde_json::from_slice::<Value>(&bytes)
        .map_err(|_| PaginationError::ResultsNotArray)
        .and_then(|body| envelope(&path, &normalized, body, stashed_total, &config))
        .map_err(|e| {
            tracing::error!(route = %route.path, error = %e, "List handler broke the pagination contract");
            ApiError::Internal(e.into())
        })?;

    let bytes = serde_json::to_vec(&enveloped).context("Failed to serialize pagination envelope")?;
    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Error responses and opted-out requests keep the handler's body
fn should_envelope(status: StatusCode, normalized: &NormalizedQuery) -> bool {
    !status.is_client_error() && !status.is_server_error() && normalized.paging.is_enabled()
}

/// Replace the query string so `Query<_>` extractors see normalized values
fn rewrite_query(uri: &mut Uri, params: &QueryMap) -> ApiResult<()> {
    let path_and_query = if params.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), params.to_query_string())
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(
        path_and_query
            .parse::<PathAndQuery>()
            .context("Failed to rebuild request URI")?,
    );
    *uri = Uri::from_parts(parts).context("Failed to rebuild request URI")?;

    Ok(())
}
