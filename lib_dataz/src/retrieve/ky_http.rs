//! # HTTP Retrieval Utilities
//!
//! This module provides an asynchronous API client wrapper around `reqwest`
//! with middleware support for exponential backoff retries and standardized
//! JSON response handling. It is meant for one-shot lookups such as fetching
//! a job's configuration at startup, where a transient failure is worth
//! retrying before giving up.

use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;

/// Retries applied to transient failures when none is configured.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// A standardized container for API responses.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

/// A flexible asynchronous HTTP client.
///
/// Built on top of `reqwest_middleware`, it handles base URLs and automatic
/// retries.
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL request paths are appended to. Always ends with `/`.
    base_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient` with the default retry policy.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_retries(base_url, DEFAULT_MAX_RETRIES)
    }

    /// Creates a new `ApiClient` retrying transient failures up to
    /// `max_retries` times with exponential backoff.
    pub fn with_retries(base_url: &str, max_retries: u32) -> anyhow::Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base URL '{}' (must be absolute): {}", base_url, e))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            inner: client,
            base_url: url,
        })
    }

    /// The base URL all paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for `path`. The path is appended below the base URL, so a
    /// base with a path prefix (`http://host/scheduler`) keeps it.
    pub fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Performs a `GET` on `path` and decodes a JSON body on success.
    ///
    /// # Errors
    /// Returns an `anyhow::Error` if URL joining, network execution or
    /// decoding of a successful body fails. Non-2xx statuses are not errors;
    /// they come back with `success: false` and the raw body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<ApiResponse<T>> {
        let full_url = self.endpoint(path)?;
        let response: reqwest::Response = self.inner.get(full_url).send().await?;
        let status = response.status();

        if status.is_success() {
            let data = response.json::<T>().await?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            // Keep the error body for diagnostics
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_base_url() {
        assert!(ApiClient::new("/relative").is_err());
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn joins_paths_below_the_base() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
        assert_eq!(
            client.endpoint("/jobs/123/configs").unwrap().as_str(),
            "http://localhost:8080/jobs/123/configs"
        );

        let prefixed = ApiClient::new("http://localhost:8080/scheduler").unwrap();
        assert_eq!(
            prefixed.endpoint("/jobs/123/configs").unwrap().as_str(),
            "http://localhost:8080/scheduler/jobs/123/configs"
        );
        let slashed = ApiClient::new("http://localhost:8080/scheduler/").unwrap();
        assert_eq!(
            slashed.endpoint("jobs/123/configs").unwrap().as_str(),
            "http://localhost:8080/scheduler/jobs/123/configs"
        );
    }
}
