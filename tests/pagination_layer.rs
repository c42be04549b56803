//! End-to-end behavior of the pagination middleware around plain handlers.

use axum::{
    extract::Query,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use list_paginator::api::TotalCount;

mod common;
use common::*;

fn ten_items() -> Value {
    Value::Array((1..=10).map(|i| json!({ "id": i })).collect())
}

fn all_meta_active(extra: Value) -> Value {
    let mut options = json!({
        "query": { "page": { "default": 1 }, "limit": { "default": 10 } },
        "meta": { "page": { "active": true }, "limit": { "active": true } },
        "uri": "http://api.test"
    });
    if let (Some(base), Value::Object(extra)) = (options.as_object_mut(), extra) {
        base.extend(extra);
    }
    options
}

fn items_router() -> Router {
    Router::new().route(
        "/items",
        get(|| async { Json(json!({ "results": ten_items(), "totalCount": 25 })) })
            .post(|| async { Json(ten_items()) }),
    )
}

#[tokio::test]
async fn test_second_page_of_three() {
    let app = with_pagination(items_router(), config(all_meta_active(json!({}))));

    let (status, body) = get_json(app, "/items?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["meta"],
        json!({
            "page": 2,
            "limit": 10,
            "count": 10,
            "totalCount": 25,
            "pageCount": 3,
            "self": "http://api.test/items?page=2&limit=10",
            "previous": "http://api.test/items?page=1&limit=10",
            "next": "http://api.test/items?page=3&limit=10",
            "first": "http://api.test/items?page=1&limit=10",
            "last": "http://api.test/items?page=3&limit=10"
        })
    );
    assert_eq!(body["results"], ten_items());
}

#[tokio::test]
async fn test_opt_out_passes_body_through() {
    let app = with_pagination(items_router(), config(all_meta_active(json!({}))));

    let (status, body) = get_json(app, "/items?pagination=false").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "results": ten_items(), "totalCount": 25 }));
}

#[tokio::test]
async fn test_invalid_page_is_rejected_before_handler() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let routes = Router::new().route(
        "/items",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(ten_items())
            }
        }),
    );
    let app = with_pagination(routes, config(all_meta_active(json!({ "query": { "invalid": "error" } }))));

    let (status, body) = get_json(app, "/items?page=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "Invalid page");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_page_falls_back_to_default() {
    let app = with_pagination(items_router(), config(all_meta_active(json!({}))));

    let (status, body) = get_json(app, "/items?page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["previous"], Value::Null);
}

// A literal 0 is deliberately treated like a missing value.
#[tokio::test]
async fn test_zero_page_and_limit_use_defaults() {
    let app = with_pagination(items_router(), config(all_meta_active(json!({}))));

    let (_, body) = get_json(app, "/items?page=0&limit=0").await;

    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 10);
}

#[tokio::test]
async fn test_handler_sees_normalized_query() {
    let routes = Router::new().route(
        "/echo",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            let mut pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            pairs.sort();
            Json(pairs)
        }),
    );
    let app = with_pagination(routes, config(json!({})));

    let (_, body) = get_json(app, "/echo?page=3abc&q=shoes").await;

    assert_eq!(
        body["results"],
        json!(["limit=25", "page=3", "pagination=true", "q=shoes"])
    );
}

#[tokio::test]
async fn test_handler_sees_flag_when_disabled() {
    let routes = Router::new().route(
        "/echo",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            Json(json!({ "flag": query.get("pagination"), "page": query.get("page") }))
        }),
    );
    let app = with_pagination(routes, config(json!({})));

    let (_, body) = get_json(app, "/echo?pagination=false&page=abc").await;

    assert_eq!(body, json!({ "flag": "false", "page": "abc" }));
}

#[tokio::test]
async fn test_total_count_from_response_extension() {
    let routes = Router::new().route(
        "/ids",
        get(|| async { (TotalCount(42), Json(json!([1, 2, 3]))) }),
    );
    let app = with_pagination(routes, config(json!({ "query": { "limit": { "default": 3 } } })));

    let (_, body) = get_json(app, "/ids").await;

    assert_eq!(body["meta"]["totalCount"], 42);
    assert_eq!(body["meta"]["pageCount"], 14);
    assert_eq!(body["meta"]["count"], 3);
    assert_eq!(body["meta"]["last"], "/ids?page=14&limit=3");
}

#[tokio::test]
async fn test_bare_array_without_total() {
    let routes = Router::new().route("/ids", get(|| async { Json(json!(["a", "b"])) }));
    let app = with_pagination(routes, config(json!({})));

    let (_, body) = get_json(app, "/ids?page=2").await;

    assert_eq!(body["meta"]["totalCount"], Value::Null);
    assert_eq!(body["meta"]["next"], Value::Null);
    assert_eq!(body["meta"]["last"], Value::Null);
    assert_eq!(body["meta"]["previous"], "/ids?page=1&limit=25");
    assert_eq!(body["results"], json!(["a", "b"]));
}

#[tokio::test]
async fn test_contract_violation_is_a_server_error() {
    let routes = Router::new().route("/broken", get(|| async { Json(json!({ "items": [] })) }));
    let app = with_pagination(routes, config(json!({})));

    let (status, body) = get_json(app, "/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_non_json_body_is_a_server_error() {
    let routes = Router::new().route("/text", get(|| async { "plain text" }));
    let app = with_pagination(routes, config(json!({})));

    let (status, _) = get_json(app, "/text").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_responses_are_untouched() {
    let routes = Router::new().route(
        "/missing",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "message": "gone" }))) }),
    );
    let app = with_pagination(routes, config(json!({})));

    let (status, body) = get_json(app, "/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "gone" }));
}

#[tokio::test]
async fn test_non_get_is_not_paginated() {
    let app = with_pagination(items_router(), config(json!({})));

    let (status, body) = send(app, "POST", "/items?page=abc", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ten_items());
}

#[tokio::test]
async fn test_include_matches_route_template() {
    let routes = Router::new()
        .route("/projects/:id/items", get(|| async { Json(ten_items()) }))
        .route("/projects/:id/notes", get(|| async { Json(ten_items()) }));
    let app = with_pagination(
        routes,
        config(json!({ "routes": { "include": ["/projects/:id/items"] } })),
    );

    let (_, body) = get_json(app.clone(), "/projects/7/items?page=2").await;
    assert_eq!(body["meta"]["first"], "/projects/7/items?page=1&limit=25");

    let (_, body) = get_json(app, "/projects/7/notes").await;
    assert_eq!(body, ten_items());
}

#[tokio::test]
async fn test_excluded_route_is_raw() {
    let routes = Router::new()
        .route("/items", get(|| async { Json(ten_items()) }))
        .route("/tags", get(|| async { Json(json!({ "not": "a list" })) }));
    let app = with_pagination(routes, config(json!({ "routes": { "exclude": ["/tags"] } })));

    let (status, body) = get_json(app, "/tags?page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "not": "a list" }));
}

#[tokio::test]
async fn test_route_override_defaults() {
    let routes = Router::new()
        .route("/items", get(|| async { Json(ten_items()) }))
        .route("/archived", get(|| async { Json(ten_items()) }));
    let options = json!({
        "meta": { "limit": { "active": true }, "page": { "active": true } },
        "routes": {
            "override": [
                { "routes": ["/archived"], "page": 2, "limit": 5 },
                { "routes": ["/archived", "/items"], "page": 1, "limit": 7 }
            ]
        }
    });
    let app = with_pagination(routes, config(options));

    let (_, body) = get_json(app.clone(), "/archived").await;
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["limit"], 5);

    let (_, body) = get_json(app, "/items").await;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 7);
}

#[tokio::test]
async fn test_disabled_by_default_needs_explicit_opt_in() {
    let options = json!({ "query": { "pagination": { "default": false } } });

    let app = with_pagination(items_router(), config(options.clone()));
    let (_, body) = get_json(app, "/items").await;
    assert_eq!(body, json!({ "results": ten_items(), "totalCount": 25 }));

    let app = with_pagination(items_router(), config(options));
    let (_, body) = get_json(app, "/items?pagination=true").await;
    assert_eq!(body["meta"]["pageCount"], 1);
}

#[tokio::test]
async fn test_custom_envelope_names_and_inactive_fields() {
    let options = json!({
        "query": { "page": { "name": "p" }, "limit": { "name": "size" } },
        "meta": {
            "name": "paging",
            "self": { "active": false },
            "totalCount": { "name": "total" }
        },
        "results": { "name": "data" }
    });
    let app = with_pagination(items_router(), config(options));

    let (_, body) = get_json(app, "/items?p=2&size=10&sort=name").await;

    assert_eq!(
        body["paging"],
        json!({
            "count": 10,
            "total": 25,
            "pageCount": 3,
            "previous": "/items?p=1&size=10&sort=name",
            "next": "/items?p=3&size=10&sort=name",
            "first": "/items?p=1&size=10&sort=name",
            "last": "/items?p=3&size=10&sort=name"
        })
    );
    assert_eq!(body["data"], ten_items());
}

#[tokio::test]
async fn test_post_route_on_same_path_not_enveloped() {
    let routes = Router::new().route("/items", post(|| async { Json(json!({ "ok": true })) }));
    let app = with_pagination(routes, config(json!({})));

    let (_, body) = send(app, "POST", "/items", None).await;
    assert_eq!(body, json!({ "ok": true }));
}

fn strict_router() -> Router {
    let routes = Router::new()
        .route("/items", get(|| async { Json(ten_items()) }))
        .route("/only-post", post(|| async { Json(json!({ "ok": true })) }));
    with_pagination(routes, config(json!({ "query": { "invalid": "error" } })))
}

#[tokio::test]
async fn test_unrouted_get_is_not_found() {
    let (status, body) = get_json(strict_router(), "/does-not-exist?page=abc").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_ne!(body["message"], "Invalid page");
}

#[tokio::test]
async fn test_get_on_post_only_route_is_method_not_allowed() {
    let (status, body) = get_json(strict_router(), "/only-post?page=abc").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_ne!(body["message"], "Invalid page");
}

#[tokio::test]
async fn test_declared_get_route_still_validated() {
    let (status, body) = get_json(strict_router(), "/items?page=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid page");
}
