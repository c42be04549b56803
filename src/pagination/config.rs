//! Pagination configuration
//!
//! Built once at startup and shared read-only (`Arc<PaginationConfig>`) by every
//! request. Partial JSON configuration is deep-merged over [`PaginationConfig::default`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::PaginationError;

/// Wildcard entry accepted as the first element of `routes.include`
pub const ALL_ROUTES: &str = "*";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub routes: RouteRules,
    pub query: QueryConfig,
    pub meta: MetaConfig,
    pub results: ResultsConfig,
    /// Prefix prepended to the request path when building navigation links
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRules {
    pub include: RouteSet,
    pub exclude: HashSet<String>,
    #[serde(rename = "override")]
    pub overrides: Vec<RouteOverride>,
}

/// Set of route paths pagination applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum RouteSet {
    All,
    Only(Vec<String>),
}

impl RouteSet {
    pub fn contains(&self, path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(paths) => paths.iter().any(|p| p == path),
        }
    }
}

impl From<Vec<String>> for RouteSet {
    fn from(paths: Vec<String>) -> Self {
        if paths.first().is_some_and(|p| p == ALL_ROUTES) {
            Self::All
        } else {
            Self::Only(paths)
        }
    }
}

impl From<RouteSet> for Vec<String> {
    fn from(set: RouteSet) -> Self {
        match set {
            RouteSet::All => vec![ALL_ROUTES.to_string()],
            RouteSet::Only(paths) => paths,
        }
    }
}

/// Route-specific page/limit defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOverride {
    pub routes: HashSet<String>,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub pagination: QueryParam<bool>,
    pub page: QueryParam<i64>,
    pub limit: QueryParam<i64>,
    pub invalid: InvalidPolicy,
}

/// A query-string key and the value used when the client omits it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParam<T> {
    pub name: String,
    pub default: T,
}

/// What to do with a `page`/`limit` value that is not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPolicy {
    /// Substitute the configured default
    Defaults,
    /// Reject the request with a 400
    Error,
}

/// Metadata fields the envelope can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    Page,
    Limit,
    Count,
    TotalCount,
    PageCount,
    SelfLink,
    Previous,
    Next,
    First,
    Last,
}

impl MetaField {
    /// Emission order inside the `meta` object
    pub const ALL: [MetaField; 10] = [
        Self::Page,
        Self::Limit,
        Self::Count,
        Self::TotalCount,
        Self::PageCount,
        Self::SelfLink,
        Self::Previous,
        Self::Next,
        Self::First,
        Self::Last,
    ];

    pub fn default_name(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Limit => "limit",
            Self::Count => "count",
            Self::TotalCount => "totalCount",
            Self::PageCount => "pageCount",
            Self::SelfLink => "self",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFieldConfig {
    pub name: String,
    pub active: bool,
}

impl MetaFieldConfig {
    fn new(field: MetaField, active: bool) -> Self {
        Self {
            name: field.default_name().to_string(),
            active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaConfig {
    /// Envelope key holding the metadata object
    pub name: String,
    pub page: MetaFieldConfig,
    pub limit: MetaFieldConfig,
    pub count: MetaFieldConfig,
    pub total_count: MetaFieldConfig,
    pub page_count: MetaFieldConfig,
    #[serde(rename = "self")]
    pub self_link: MetaFieldConfig,
    pub previous: MetaFieldConfig,
    pub next: MetaFieldConfig,
    pub first: MetaFieldConfig,
    pub last: MetaFieldConfig,
}

impl MetaConfig {
    pub fn field(&self, field: MetaField) -> &MetaFieldConfig {
        match field {
            MetaField::Page => &self.page,
            MetaField::Limit => &self.limit,
            MetaField::Count => &self.count,
            MetaField::TotalCount => &self.total_count,
            MetaField::PageCount => &self.page_count,
            MetaField::SelfLink => &self.self_link,
            MetaField::Previous => &self.previous,
            MetaField::Next => &self.next,
            MetaField::First => &self.first,
            MetaField::Last => &self.last,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Envelope key holding the result items
    pub name: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            routes: RouteRules {
                include: RouteSet::All,
                exclude: HashSet::new(),
                overrides: Vec::new(),
            },
            query: QueryConfig {
                pagination: QueryParam {
                    name: "pagination".to_string(),
                    default: true,
                },
                page: QueryParam {
                    name: "page".to_string(),
                    default: 1,
                },
                limit: QueryParam {
                    name: "limit".to_string(),
                    default: 25,
                },
                invalid: InvalidPolicy::Defaults,
            },
            meta: MetaConfig {
                name: "meta".to_string(),
                page: MetaFieldConfig::new(MetaField::Page, false),
                limit: MetaFieldConfig::new(MetaField::Limit, false),
                count: MetaFieldConfig::new(MetaField::Count, true),
                total_count: MetaFieldConfig::new(MetaField::TotalCount, true),
                page_count: MetaFieldConfig::new(MetaField::PageCount, true),
                self_link: MetaFieldConfig::new(MetaField::SelfLink, true),
                previous: MetaFieldConfig::new(MetaField::Previous, true),
                next: MetaFieldConfig::new(MetaField::Next, true),
                first: MetaFieldConfig::new(MetaField::First, true),
                last: MetaFieldConfig::new(MetaField::Last, true),
            },
            results: ResultsConfig {
                name: "results".to_string(),
            },
            uri: String::new(),
        }
    }
}

impl PaginationConfig {
    /// Merge user options over the defaults. Objects merge key by key, arrays
    /// and scalars replace.
    pub fn from_json(options: Value) -> Result<Self, PaginationError> {
        let mut merged = serde_json::to_value(Self::default())
            .map_err(|e| PaginationError::InvalidConfig(e.to_string()))?;
        merge(&mut merged, options);

        let config: Self = serde_json::from_value(merged)
            .map_err(|e| PaginationError::InvalidConfig(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    /// Page/limit defaults in effect for a route: the first override entry
    /// listing the path wins, later entries are ignored.
    pub fn defaults_for(&self, path: &str) -> (i64, i64) {
        self.routes
            .overrides
            .iter()
            .find(|o| o.routes.contains(path))
            .map(|o| (o.page, o.limit))
            .unwrap_or((self.query.page.default, self.query.limit.default))
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        let invalid = |msg: String| Err(PaginationError::InvalidConfig(msg));

        if self.query.page.default < 1 {
            return invalid("query.page.default must be at least 1".into());
        }
        if self.query.limit.default < 1 {
            return invalid("query.limit.default must be at least 1".into());
        }

        for (i, entry) in self.routes.overrides.iter().enumerate() {
            if entry.page < 1 || entry.limit < 1 {
                return invalid(format!(
                    "routes.override[{i}] page and limit must be at least 1"
                ));
            }
        }

        let names = [
            &self.query.pagination.name,
            &self.query.page.name,
            &self.query.limit.name,
        ];
        if names.iter().any(|n| n.is_empty()) {
            return invalid("query parameter names must not be empty".into());
        }
        let distinct: HashSet<&String> = names.iter().copied().collect();
        if distinct.len() != names.len() {
            return invalid("query parameter names must be distinct".into());
        }

        if self.meta.name.is_empty() || self.results.name.is_empty() {
            return invalid("meta.name and results.name must not be empty".into());
        }
        if self.meta.name == self.results.name {
            return invalid("meta.name and results.name must differ".into());
        }

        Ok(())
    }
}

fn merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}
