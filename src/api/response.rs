//! Standard API response types

use axum::{
    http::StatusCode,
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
    Json,
};
use serde::Serialize;
use std::convert::Infallible;

/// One page of a list plus the size of the whole list.
///
/// Serializes to `{"results": [...], "totalCount": n}`, the shape the
/// pagination middleware wraps into an envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet<T: Serialize> {
    pub results: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

impl<T: Serialize> ResultSet<T> {
    pub fn new(results: Vec<T>, total_count: i64) -> Self {
        Self {
            results,
            total_count: Some(total_count),
        }
    }
}

impl<T: Serialize> IntoResponse for ResultSet<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Total list size attached out of band, for handlers that respond with a
/// bare JSON array.
///
/// ```ignore
/// async fn list_ids() -> (TotalCount, Json<Vec<Uuid>>) {
///     (TotalCount(120), Json(ids))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalCount(pub i64);

impl IntoResponseParts for TotalCount {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.extensions_mut().insert(self);
        Ok(res)
    }
}

/// Helper for creating responses with status codes
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
