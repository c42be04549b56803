//! List pagination for axum services.
//!
//! Handlers return a bare list or a [`api::ResultSet`]; the
//! [`middleware::paginate`] layer normalizes `page`/`limit` before the
//! handler runs and wraps the result in a `{meta, results}` envelope with
//! navigation links afterwards.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pagination;
pub mod routes;
