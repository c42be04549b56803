//! Pre-handler normalization of the pagination query parameters

use super::config::{InvalidPolicy, PaginationConfig, QueryParam};
use super::matcher::{is_paginated, RouteInfo};
use super::query::{parse_int_prefix, QueryMap};
use super::PaginationError;

/// Pagination state resolved for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// The client opted out (or pagination is off by default)
    Disabled,
    Enabled { page: i64, limit: i64 },
}

impl Paging {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

/// Query parameters after normalization, handed to the handler and later to
/// the enveloper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub params: QueryMap,
    pub paging: Paging,
}

/// Resolve the pagination flag and the page/limit values for a request.
///
/// Returns `Ok(None)` when the route is not paginated. The resolved values are
/// written back into `params` under their configured names.
pub fn normalize(
    route: &RouteInfo,
    query: QueryMap,
    config: &PaginationConfig,
) -> Result<Option<NormalizedQuery>, PaginationError> {
    if !is_paginated(route, config) {
        return Ok(None);
    }

    let mut params = query;
    let enabled = pagination_flag(&params, config);
    params.set(&config.query.pagination.name, enabled);

    if !enabled {
        return Ok(Some(NormalizedQuery {
            params,
            paging: Paging::Disabled,
        }));
    }

    let (default_page, default_limit) = config.defaults_for(&route.path);
    let page = resolve_param(&params, &config.query.page, config.query.invalid, default_page)?;
    let limit = resolve_param(
        &params,
        &config.query.limit,
        config.query.invalid,
        default_limit,
    )?;

    params.set(&config.query.page.name, page);
    params.set(&config.query.limit.name, limit);

    Ok(Some(NormalizedQuery {
        params,
        paging: Paging::Enabled { page, limit },
    }))
}

/// Only the literal strings `true` and `false` override the configured default
fn pagination_flag(params: &QueryMap, config: &PaginationConfig) -> bool {
    match params.get(&config.query.pagination.name) {
        Some("true") => true,
        Some("false") => false,
        _ => config.query.pagination.default,
    }
}

fn resolve_param(
    params: &QueryMap,
    param: &QueryParam<i64>,
    policy: InvalidPolicy,
    effective_default: i64,
) -> Result<i64, PaginationError> {
    let explicit = match params.get(&param.name) {
        None => None,
        Some(raw) => match parse_int_prefix(raw) {
            Some(value) => Some(value),
            // Falls back to the global default, not the route override
            None if policy == InvalidPolicy::Defaults => Some(param.default),
            None => {
                return Err(PaginationError::InvalidParam {
                    name: param.name.clone(),
                })
            }
        },
    };

    Ok(zero_is_absent(explicit).unwrap_or(effective_default))
}

/// A supplied `0` counts as "not supplied", so the effective default applies
pub fn zero_is_absent(value: Option<i64>) -> Option<i64> {
    value.filter(|&v| v != 0)
}
