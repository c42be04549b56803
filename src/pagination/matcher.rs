use axum::http::Method;

use super::PaginationConfig;

/// The route a request was dispatched to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: Method,
    /// Declared route path (e.g. `/projects/:id/items`), not the concrete URI path
    pub path: String,
}

impl RouteInfo {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// Whether pagination applies to a route: GET only, included (or wildcard),
/// and not excluded. Exclusion always wins.
pub fn is_paginated(route: &RouteInfo, config: &PaginationConfig) -> bool {
    route.method == Method::GET
        && config.routes.include.contains(&route.path)
        && !config.routes.exclude.contains(&route.path)
}
