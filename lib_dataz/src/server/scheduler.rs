//! Job config lookup: `GET /jobs/{job}/configs` returns the `JobConfig`
//! registered for `/jobs/{job}`, or 404.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{info, warn};

use super::health_handler;
use crate::jobs::{job_name, JobRegistry};

/// Builds the scheduler router over `registry`.
pub fn scheduler_router(registry: Arc<JobRegistry>) -> Router {
    Router::new()
        .route("/jobs/{job}/configs", get(job_config_handler))
        .route("/health", get(health_handler))
        .with_state(registry)
}

async fn job_config_handler(
    State(registry): State<Arc<JobRegistry>>,
    Path(job): Path<String>,
) -> Response {
    match registry.get(&job) {
        Some(config) => {
            info!(job = %job_name(&job), config = %config.name, "Serving job config");
            Json(config.clone()).into_response()
        }
        None => {
            warn!(job = %job_name(&job), "Unknown job");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
