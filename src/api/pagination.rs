//! Pagination values as seen by list handlers

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::pagination::Paging;

/// Normalized page/limit for the current request.
///
/// Reads what the pagination middleware resolved, so handlers never parse the
/// query string themselves. Requests on unpaginated routes, or with
/// pagination switched off, see [`Paging::Disabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(pub Paging);

impl PageRequest {
    pub fn page(&self) -> Option<i64> {
        match self.0 {
            Paging::Enabled { page, .. } => Some(page),
            Paging::Disabled => None,
        }
    }

    /// Maximum number of items to return, unbounded when disabled
    pub fn limit(&self) -> usize {
        match self.0 {
            Paging::Enabled { limit, .. } => usize::try_from(limit).unwrap_or(0),
            Paging::Disabled => usize::MAX,
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        match self.0 {
            Paging::Enabled { page, limit } => {
                let skipped = page.saturating_sub(1).saturating_mul(limit);
                usize::try_from(skipped).unwrap_or(0)
            }
            Paging::Disabled => 0,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let paging = parts
            .extensions
            .get::<Paging>()
            .copied()
            .unwrap_or(Paging::Disabled);

        Ok(PageRequest(paging))
    }
}
