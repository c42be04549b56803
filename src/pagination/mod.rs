//! Pagination for list endpoints
//!
//! Route matching, query normalization before the handler runs, and response
//! enveloping after it returns. [`crate::middleware::paginate`] wires these
//! into the axum request lifecycle.

pub mod config;
pub mod envelope;
pub mod matcher;
pub mod normalizer;
pub mod query;

use thiserror::Error;

pub use config::{InvalidPolicy, MetaField, PaginationConfig, RouteSet};
pub use envelope::envelope;
pub use matcher::{is_paginated, RouteInfo};
pub use normalizer::{normalize, NormalizedQuery, Paging};
pub use query::QueryMap;

#[derive(Debug, Error)]
pub enum PaginationError {
    /// Client sent a `page`/`limit` value that is not a number
    #[error("Invalid {name}")]
    InvalidParam { name: String },

    /// Handler broke the list contract; this is a bug, not bad input
    #[error("The results must be an array")]
    ResultsNotArray,

    #[error("Invalid pagination configuration: {0}")]
    InvalidConfig(String),
}
