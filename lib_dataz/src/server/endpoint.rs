//! # Poll Endpoint
//!
//! `GET /streams/{feed}/items[?from=N]` answers with every retained item of
//! `feed` whose sequence number is greater than `N` (0 when absent), as a
//! JSON array in ascending order. An unknown feed is a 404, a `from` that is
//! not a non-negative integer is a 400; both with an empty body.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::health_handler;
use crate::feeds::{FeedRegistry, ItemRecord};

/// Request-level failures of the poll endpoint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    /// The path names a feed that is not registered.
    #[error("Unknown feed: {0}")]
    NotFound(String),
    /// The `from` parameter is not a non-negative integer.
    #[error("Invalid cursor: {0}")]
    BadCursor(String),
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        let status = match &self {
            PollError::NotFound(_) => StatusCode::NOT_FOUND,
            PollError::BadCursor(_) => StatusCode::BAD_REQUEST,
        };
        warn!("{} -> {}", self, status);
        status.into_response()
    }
}

/// Query string of a poll request. `from` is kept raw so that a malformed
/// value can be reported as a bad cursor rather than a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PollParams {
    from: Option<String>,
}

/// Parses the optional cursor; absent means 0.
pub fn parse_cursor(from: Option<&str>) -> Result<u64, PollError> {
    match from {
        None => Ok(0),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| PollError::BadCursor(raw.to_string())),
    }
}

/// Builds the feed service router over `registry`.
pub fn feed_router(registry: Arc<FeedRegistry>) -> Router {
    Router::new()
        .route("/streams/{feed}/items", get(poll_items_handler))
        .route("/health", get(health_handler))
        .with_state(registry)
}

/// # Poll Items Handler
///
/// Resolves the feed first, then the cursor, then reads the buffer. Holds
/// no lock beyond the buffer scan itself. A query string that does not even
/// decode only counts once the feed is known.
async fn poll_items_handler(
    State(registry): State<Arc<FeedRegistry>>,
    Path(feed): Path<String>,
    query: Result<Query<PollParams>, QueryRejection>,
) -> Result<Json<Vec<ItemRecord>>, PollError> {
    let feed = registry
        .get(&feed)
        .ok_or_else(|| PollError::NotFound(feed.clone()))?;
    let Query(params) = query.map_err(|e| PollError::BadCursor(e.body_text()))?;
    let cursor = parse_cursor(params.from.as_deref())?;

    let records = feed.records_from(cursor);
    debug!(
        feed = %feed.name(),
        cursor,
        count = records.len(),
        "Serving poll request"
    );
    Ok(Json(records))
}
