//! # HTTP Server Module
//!
//! Axum routers for the two services:
//!
//! - **`endpoint`**: the feed service's item polling endpoint,
//!   `GET /streams/{feed}/items[?from=N]`.
//! - **`scheduler`**: the job config lookup, `GET /jobs/{job}/configs`.
//!
//! Both routers are stateless per request; their state is an immutable
//! registry injected by the binary that builds them.

/// Item polling endpoint.
pub mod endpoint;
/// Job config lookup endpoint.
pub mod scheduler;

pub use endpoint::{feed_router, PollError};
pub use scheduler::scheduler_router;

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Liveness probe shared by both services.
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
