use axum::{http::HeaderValue, middleware, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::domain::ItemCatalog;
use crate::middleware::{paginate, request_id_layer, X_REQUEST_ID};
use crate::pagination::PaginationConfig;
use crate::routes;

/// Shared application state
pub struct AppState {
    pub settings: Settings,
    /// Read-only for the life of the process
    pub pagination: Arc<PaginationConfig>,
    pub catalog: ItemCatalog,
}

impl AppState {
    pub fn new(settings: Settings, catalog: ItemCatalog) -> Arc<Self> {
        let pagination = Arc::new(settings.pagination.clone());

        Arc::new(Self {
            settings,
            pagination,
            catalog,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(&state.settings);

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    // Request ID layers
    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::api_router())
        // Only declared method endpoints are paginated, never the 404/405 fallbacks
        .route_layer(middleware::from_fn_with_state(
            state.pagination.clone(),
            paginate,
        ))
        // Middleware stack (applied bottom-up)
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static(X_REQUEST_ID),
        ]))
        .max_age(std::time::Duration::from_secs(3600))
}
