//! Post-handler rewriting of list responses into `{meta, results}` envelopes

use serde_json::{json, Map, Value};

use super::config::{MetaField, PaginationConfig};
use super::normalizer::{NormalizedQuery, Paging};
use super::query::QueryMap;
use super::PaginationError;

/// Body key a handler uses to report the size of the full result set
pub const TOTAL_COUNT_KEY: &str = "totalCount";
/// Body key holding the items when a handler returns an object
pub const RESULTS_KEY: &str = "results";

/// Wrap a handler's body in a pagination envelope.
///
/// `path` is the concrete request path used for links. `stashed_total` is
/// the count a handler attached out of band; it is only consulted when the
/// body carries no usable `totalCount`. Bodies of requests with pagination
/// disabled are returned unchanged.
pub fn envelope(
    path: &str,
    query: &NormalizedQuery,
    body: Value,
    stashed_total: Option<i64>,
    config: &PaginationConfig,
) -> Result<Value, PaginationError> {
    let Paging::Enabled { page, limit } = query.paging else {
        return Ok(body);
    };

    let (results, body_total) = split_body(body)?;
    let total_count = body_total.or(stashed_total.filter(|&n| n != 0));

    let mut params = query.params.clone();
    params.remove(&config.query.pagination.name);

    let links = Links {
        base: format!("{}{}?", config.uri, path),
        params: &params,
        page_name: &config.query.page.name,
    };
    let pages = total_count.map(|total| page_count(total, limit));

    let mut meta = Map::new();
    for field in MetaField::ALL {
        let descriptor = config.meta.field(field);
        if !descriptor.active {
            continue;
        }

        let value = match field {
            MetaField::Page => json!(page),
            MetaField::Limit => json!(limit),
            MetaField::Count => json!(results.len()),
            MetaField::TotalCount => json!(total_count),
            MetaField::PageCount => json!(pages),
            MetaField::SelfLink => json!(links.current()),
            MetaField::Previous => json!((page != 1).then(|| links.to_page(page.saturating_sub(1)))),
            MetaField::Next => {
                let has_next = pages.is_some_and(|count| page < count);
                json!(has_next.then(|| links.to_page(page.saturating_add(1))))
            }
            MetaField::First => json!(links.to_page(1)),
            MetaField::Last => json!(pages.map(|count| links.to_page(count))),
        };
        meta.insert(descriptor.name.clone(), value);
    }

    let mut envelope = Map::new();
    envelope.insert(config.meta.name.clone(), Value::Object(meta));
    envelope.insert(config.results.name.clone(), Value::Array(results));

    Ok(Value::Object(envelope))
}

/// `ceil(total / limit)` in integer arithmetic
pub fn page_count(total: i64, limit: i64) -> i64 {
    let whole = total.wrapping_div(limit);
    if total.wrapping_rem(limit) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Pull the item array (and a non-zero `totalCount`, if any) out of a body
fn split_body(body: Value) -> Result<(Vec<Value>, Option<i64>), PaginationError> {
    match body {
        Value::Array(items) => Ok((items, None)),
        Value::Object(mut object) => {
            let total = object
                .get(TOTAL_COUNT_KEY)
                .and_then(Value::as_i64)
                .filter(|&n| n != 0);

            match object.remove(RESULTS_KEY) {
                Some(Value::Array(items)) => Ok((items, total)),
                _ => Err(PaginationError::ResultsNotArray),
            }
        }
        _ => Err(PaginationError::ResultsNotArray),
    }
}

struct Links<'a> {
    base: String,
    params: &'a QueryMap,
    page_name: &'a str,
}

impl Links<'_> {
    fn current(&self) -> String {
        format!("{}{}", self.base, self.params.to_query_string())
    }

    fn to_page(&self, page: i64) -> String {
        let mut params = self.params.clone();
        params.set(self.page_name, page);
        format!("{}{}", self.base, params.to_query_string())
    }
}
