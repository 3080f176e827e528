//! # Cursor Polling Ingestor
//!
//! Drains a feed over HTTP by repeatedly asking for "everything after my
//! cursor". After each non-empty batch the cursor moves to the last sequence
//! number received, so the next request picks up exactly where this one
//! stopped. Whatever the server evicted in between is lost; the poller itself
//! never skips anything.
//!
//! ## Key Design Principles:
//! - **Self-Scheduling**: the poller owns its timing. It polls, sleeps for a
//!   fixed interval, and polls again until it has accumulated enough items.
//! - **No built-in retry**: a transport or decode fault ends the run and is
//!   returned to the caller. Retrying is the caller's decision.
//! - **Immutable configuration**: the `JobConfig` is fetched once and held for
//!   the poller's whole lifetime.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::feeds::ItemRecord;
use crate::jobs::JobConfig;

/// Default pause between two poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Default number of items to accumulate before stopping.
pub const DEFAULT_THRESHOLD: usize = 16;

/// Faults of a single poll cycle.
#[derive(Debug, Error)]
pub enum PollerError {
    /// The request could not be sent or the response not read.
    #[error("Transport error while polling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Polling {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not a JSON array of item records.
    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// # Poller Options
///
/// Timing and stopping rule of a `CursorPoller`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerOptions {
    /// Pause between two poll cycles.
    pub interval: Duration,
    /// Stop once at least this many items have been accumulated.
    pub threshold: usize,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// # Cursor Poller
///
/// Client-side consumer of one feed.
#[derive(Debug)]
pub struct CursorPoller {
    /// Where to poll and how to interpret payloads. Never modified.
    config: JobConfig,
    /// Plain client without retry middleware; faults surface immediately.
    client: reqwest::Client,
    options: PollerOptions,
    /// Highest sequence number already consumed; 0 before the first item.
    cursor: u64,
    accumulated: Vec<ItemRecord>,
}

impl CursorPoller {
    /// Creates a poller for the feed described by `config`.
    pub fn new(config: JobConfig, options: PollerOptions) -> Self {
        Self::with_client(config, options, reqwest::Client::new())
    }

    /// Same as `new`, polling through an existing client (e.g. one with a
    /// request timeout).
    pub fn with_client(config: JobConfig, options: PollerOptions, client: reqwest::Client) -> Self {
        Self {
            config,
            client,
            options,
            cursor: 0,
            accumulated: Vec::new(),
        }
    }

    /// The cursor the next request will carry.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Items collected so far, in the order received.
    pub fn accumulated(&self) -> &[ItemRecord] {
        &self.accumulated
    }

    /// True once the accumulation threshold is reached.
    pub fn is_done(&self) -> bool {
        self.accumulated.len() >= self.options.threshold
    }

    /// Request URL for `cursor`. The `from` parameter is only sent once the
    /// cursor has moved.
    pub fn request_url(&self, cursor: u64) -> String {
        let url = self.config.items_url();
        if cursor > 0 {
            format!("{}?from={}", url, cursor)
        } else {
            url
        }
    }

    /// Fetches the items after `cursor` without touching the poller's state.
    pub async fn fetch(&self, cursor: u64) -> Result<Vec<ItemRecord>, PollerError> {
        let url = self.request_url(cursor);
        debug!(url = %url, "Polling");

        let transport = |source| PollerError::Transport {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PollerError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        decode_batch(&body).map_err(|source| PollerError::Decode { url, source })
    }

    /// # Poll Once
    ///
    /// One poll cycle: fetch after the current cursor, append a non-empty
    /// batch to the accumulated items and advance the cursor to its last
    /// sequence number. Returns the batch size. Does not sleep.
    pub async fn poll_once(&mut self) -> Result<usize, PollerError> {
        let batch = self.fetch(self.cursor).await?;
        for record in &batch {
            info!(stream = %self.config.stream, "{}", record);
        }
        if let Some(last) = batch.last() {
            self.cursor = last.n;
        }
        let received = batch.len();
        self.accumulated.extend(batch);

        debug!(
            stream = %self.config.stream,
            received,
            total = self.accumulated.len(),
            cursor = self.cursor,
            "Poll cycle complete"
        );
        Ok(received)
    }

    /// # Main Execution Loop
    ///
    /// Polls, sleeps for the configured interval, and repeats until the
    /// accumulation threshold is reached; then yields everything collected.
    /// The first fault aborts the run.
    pub async fn run(mut self) -> Result<Vec<ItemRecord>, PollerError> {
        info!(
            job = %self.config.name,
            url = %self.config.items_url(),
            threshold = self.options.threshold,
            "Cursor poller started"
        );

        while !self.is_done() {
            self.poll_once().await?;
            tokio::time::sleep(self.options.interval).await;
        }

        info!(
            job = %self.config.name,
            received = self.accumulated.len(),
            cursor = self.cursor,
            "Cursor poller finished"
        );
        Ok(self.accumulated)
    }
}

/// Decodes a poll response body. An empty body is an empty batch.
pub fn decode_batch(body: &[u8]) -> Result<Vec<ItemRecord>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::GenerationMode;

    fn config() -> JobConfig {
        JobConfig {
            name: "/configs/123".to_string(),
            dataz: "http://localhost:8081".to_string(),
            stream: "/streams/fast".to_string(),
            d_type: GenerationMode::RandomNumbers,
        }
    }

    #[test]
    fn request_url_omits_zero_cursor() {
        let poller = CursorPoller::new(config(), PollerOptions::default());
        assert_eq!(poller.request_url(0), "http://localhost:8081/streams/fast/items");
        assert_eq!(
            poller.request_url(12),
            "http://localhost:8081/streams/fast/items?from=12"
        );
        assert_eq!(poller.cursor(), 0);
        assert!(poller.accumulated().is_empty());
    }

    #[test]
    fn decode_handles_empty_and_malformed_bodies() {
        assert!(decode_batch(b"").unwrap().is_empty());
        assert!(decode_batch(b"  \n").unwrap().is_empty());
        assert!(decode_batch(b"[]").unwrap().is_empty());
        assert!(decode_batch(b"{not json").is_err());

        let batch = decode_batch(br#"[{"name":"/streams/fast/items/1","n":1,"ts":5,"data":[3]}]"#)
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].n, 1);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_fault() {
        let mut config = config();
        // Port 9 (discard) on loopback is closed on any sane test host.
        config.dataz = "http://127.0.0.1:9".to_string();
        let mut poller = CursorPoller::new(config, PollerOptions::default());

        let err = poller.poll_once().await.unwrap_err();
        assert!(matches!(err, PollerError::Transport { .. }));
        assert_eq!(poller.cursor(), 0);
    }
}
