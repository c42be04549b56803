//! Shared helpers for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use list_paginator::app::{create_app, AppState};
use list_paginator::config::{Environment, Settings};
use list_paginator::domain::ItemCatalog;
use list_paginator::middleware::paginate;
use list_paginator::pagination::PaginationConfig;

/// Full demo application with a seeded catalog
pub fn demo_app(pagination: PaginationConfig, items: usize) -> Router {
    let settings = Settings {
        env: Environment::Dev,
        server_addr: "127.0.0.1:0".to_string(),
        cors_allow_origins: vec![],
        seed_items: items,
        pagination,
    };

    create_app(AppState::new(settings, ItemCatalog::seeded(items)))
}

/// Wrap arbitrary routes in the pagination middleware only
pub fn with_pagination(routes: Router, config: PaginationConfig) -> Router {
    routes.route_layer(middleware::from_fn_with_state(Arc::new(config), paginate))
}

pub fn config(options: Value) -> PaginationConfig {
    PaginationConfig::from_json(options).expect("valid pagination config")
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}
