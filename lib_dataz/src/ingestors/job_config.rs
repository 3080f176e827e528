//! One-shot retrieval of a job's configuration from the scheduler service.

use anyhow::{anyhow, Context};
use tracing::info;

use crate::jobs::{job_name, JobConfig};
use crate::retrieve::ApiClient;

/// Fetches the `JobConfig` of `job` (`123` or `/jobs/123`) from the scheduler
/// at `scheduler_base`, via `GET <scheduler>/jobs/<id>/configs`. A path
/// prefix on `scheduler_base` is kept.
///
/// Transient failures are retried by the client's backoff policy; a non-2xx
/// answer is an error.
pub async fn retrieve_config(scheduler_base: &str, job: &str) -> anyhow::Result<JobConfig> {
    let client = ApiClient::new(scheduler_base)?;
    retrieve_config_with(&client, job).await
}

/// Same as `retrieve_config`, through an existing client.
pub async fn retrieve_config_with(client: &ApiClient, job: &str) -> anyhow::Result<JobConfig> {
    let path = format!("{}/configs", job_name(job));
    let response = client
        .get_json::<JobConfig>(&path)
        .await
        .with_context(|| format!("Failed to retrieve config for {}", job_name(job)))?;

    if !response.success {
        let body = response.error_body.unwrap_or_default();
        return Err(anyhow!(
            "Retrieving config for {} returned HTTP {}: {}",
            job_name(job),
            response.status,
            body.trim()
        ));
    }

    let config = response
        .data
        .ok_or_else(|| anyhow!("Empty config for {}", job_name(job)))?;
    info!(job = %job_name(job), config = %config.name, stream = %config.stream, "Retrieved job config");
    Ok(config)
}
