//! # Jobs Module
//!
//! A job is a named consumer of one feed. Its configuration record tells a
//! poller where the feed service lives, which feed to drain, and how to read
//! the payloads. The scheduler service serves these records; pollers fetch
//! theirs once at startup and treat it as immutable afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::feeds::feed::STREAMS_PREFIX;
use crate::feeds::GenerationMode;

/// Prefix of every job name.
pub const JOBS_PREFIX: &str = "/jobs";

/// # Job Config
///
/// Wire shape: `{"name": "/configs/123", "dataz": "http://host:8081",
/// "stream": "/streams/fast", "dType": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Config record name, e.g. `/configs/123`.
    pub name: String,
    /// Base URL of the feed service.
    pub dataz: String,
    /// Feed path on that service, e.g. `/streams/fast`.
    pub stream: String,
    /// How the feed's payloads were generated.
    #[serde(rename = "dType")]
    pub d_type: GenerationMode,
}

impl JobConfig {
    /// URL of the feed's item listing, `<dataz><stream>/items`.
    pub fn items_url(&self) -> String {
        format!("{}{}/items", self.dataz.trim_end_matches('/'), self.stream)
    }
}

/// # Job Registry
///
/// Immutable job name to config mapping, built once by the scheduler's
/// composition root.
#[derive(Debug, Default, Clone)]
pub struct JobRegistry {
    jobs: HashMap<String, JobConfig>,
}

impl JobRegistry {
    /// Registers each `(job name, config)` pair. Job names are normalized to
    /// the `/jobs/<id>` form.
    pub fn new(entries: impl IntoIterator<Item = (String, JobConfig)>) -> Self {
        let jobs = entries
            .into_iter()
            .map(|(name, config)| (job_name(&name), config))
            .collect();
        Self { jobs }
    }

    /// The stock table pointing jobs `123`, `456` and `789` at the `fast`,
    /// `medium` and `slow` feeds of the service at `dataz`.
    pub fn with_defaults(dataz: &str) -> Self {
        let entry = |id: &str, feed: &str, mode: GenerationMode| {
            (
                id.to_string(),
                JobConfig {
                    name: format!("/configs/{}", id),
                    dataz: dataz.to_string(),
                    stream: format!("{}/{}", STREAMS_PREFIX, feed),
                    d_type: mode,
                },
            )
        };
        Self::new([
            entry("123", "fast", GenerationMode::RandomNumbers),
            entry("456", "medium", GenerationMode::RandomLetters),
            entry("789", "slow", GenerationMode::SawingNumbers),
        ])
    }

    /// Looks a job up by id (`123`) or full name (`/jobs/123`).
    pub fn get(&self, job: &str) -> Option<&JobConfig> {
        self.jobs.get(&job_name(job))
    }

    /// Number of registered jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True when no job is registered.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Normalizes `123`, `/jobs/123` or `jobs/123` to `/jobs/123`.
pub fn job_name(job: &str) -> String {
    let id = job
        .trim_start_matches('/')
        .trim_start_matches("jobs/")
        .trim_matches('/');
    format!("{}/{}", JOBS_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_names_are_normalized() {
        assert_eq!(job_name("123"), "/jobs/123");
        assert_eq!(job_name("/jobs/123"), "/jobs/123");
        assert_eq!(job_name("jobs/123/"), "/jobs/123");
    }

    #[test]
    fn default_table_points_at_the_stock_feeds() {
        let registry = JobRegistry::with_defaults("http://localhost:8081");
        assert_eq!(registry.len(), 3);

        let config = registry.get("/jobs/456").unwrap();
        assert_eq!(config.name, "/configs/456");
        assert_eq!(config.stream, "/streams/medium");
        assert_eq!(config.d_type, GenerationMode::RandomLetters);
        assert_eq!(config.items_url(), "http://localhost:8081/streams/medium/items");

        assert!(registry.get("999").is_none());
    }

    #[test]
    fn config_wire_format() {
        let json = r#"{"name":"/configs/123","dataz":"http://d:1/","stream":"/streams/fast","dType":2}"#;
        let config: JobConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.d_type, GenerationMode::RandomNumbers);
        assert_eq!(config.items_url(), "http://d:1/streams/fast/items");

        let bad = r#"{"name":"x","dataz":"d","stream":"s","dType":7}"#;
        assert!(serde_json::from_str::<JobConfig>(bad).is_err());
    }
}
