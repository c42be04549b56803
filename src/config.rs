use anyhow::{Context, Result};
use serde_json::json;
use std::env;

use crate::pagination::{InvalidPolicy, PaginationConfig, RouteSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Demo catalog
    pub seed_items: usize,

    // Pagination
    pub pagination: PaginationConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = comma_list(
            &env::var("CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        );

        let seed_items = env::var("SEED_ITEMS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(57);

        let pagination = pagination_from_env()?;

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            seed_items,
            pagination,
        })
    }
}

/// Options used when `PAGINATION_CONFIG` is not set
pub fn default_pagination_options() -> serde_json::Value {
    json!({
        "routes": {
            "exclude": ["/health", "/tags"],
            "override": [
                { "routes": ["/items/archived"], "page": 1, "limit": 5 }
            ]
        }
    })
}

/// Build the pagination configuration: `PAGINATION_CONFIG` (JSON) merged over
/// the library defaults, then individual `PAGINATION_*` variables on top.
pub fn pagination_from_env() -> Result<PaginationConfig> {
    let options: serde_json::Value = match env::var("PAGINATION_CONFIG") {
        Ok(raw) => serde_json::from_str(&raw).context("PAGINATION_CONFIG must be valid JSON")?,
        Err(_) => default_pagination_options(),
    };
    let mut config = PaginationConfig::from_json(options)?;

    if let Ok(uri) = env::var("PAGINATION_BASE_URI") {
        config.uri = uri.trim_end_matches('/').to_string();
    }
    if let Some(page) = parse_var::<i64>("PAGINATION_DEFAULT_PAGE")? {
        config.query.page.default = page;
    }
    if let Some(limit) = parse_var::<i64>("PAGINATION_DEFAULT_LIMIT")? {
        config.query.limit.default = limit;
    }
    if let Some(enabled) = parse_var::<bool>("PAGINATION_ENABLED_BY_DEFAULT")? {
        config.query.pagination.default = enabled;
    }
    if let Ok(policy) = env::var("PAGINATION_INVALID") {
        config.query.invalid = match policy.trim().to_lowercase().as_str() {
            "defaults" => InvalidPolicy::Defaults,
            "error" => InvalidPolicy::Error,
            other => anyhow::bail!("PAGINATION_INVALID must be 'defaults' or 'error', got '{other}'"),
        };
    }
    if let Ok(include) = env::var("PAGINATION_INCLUDE") {
        config.routes.include = RouteSet::from(comma_list(&include));
    }
    if let Ok(exclude) = env::var("PAGINATION_EXCLUDE") {
        config.routes.exclude = comma_list(&exclude).into_iter().collect();
    }

    config.validate()?;

    Ok(config)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .ok()
        .map(|s| s.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("{name} has an invalid value"))
}

fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
