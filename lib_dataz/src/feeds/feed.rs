//! # Feed
//!
//! A feed owns one ring buffer and the counter that numbers its items. Its
//! producer loop is the sole writer to both: every `interval` it synthesizes
//! the next item, appends it, and goes back to sleep.
//!
//! The loop is meant to run for the life of the process. It still takes a
//! `CancellationToken` so that callers (and tests) can stop it on demand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::item::{GenerationMode, Item, ItemRecord};
use super::ring_buffer::RingBuffer;
use crate::configs::FeedSpec;

/// Routing prefix shared by all feeds.
pub const STREAMS_PREFIX: &str = "/streams";

/// # Feed
///
/// A named producer of sequentially numbered items backed by a `RingBuffer`.
#[derive(Debug)]
pub struct Feed {
    name: String,
    path: String,
    mode: GenerationMode,
    interval: Duration,
    buffer: RingBuffer<Item>,
    /// Sequence number of the next item. Written only by the producer.
    next_sequence: AtomicU64,
}

impl Feed {
    /// Creates a feed with an empty buffer; nothing is produced until `tick`
    /// or `run` is called.
    pub fn new(name: &str, mode: GenerationMode, interval: Duration, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            path: format!("{}/{}", STREAMS_PREFIX, name),
            mode,
            interval,
            buffer: RingBuffer::new(capacity),
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Builds a feed from its configuration entry.
    pub fn from_spec(spec: &FeedSpec) -> Self {
        Self::new(&spec.name, spec.mode, spec.interval, spec.capacity)
    }

    /// The routing name, e.g. `fast`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The feed path used in display names, e.g. `/streams/fast`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sequence number the next produced item will carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence.load(Ordering::Acquire)
    }

    /// Produces and appends exactly one item, returning its sequence number.
    ///
    /// Only the producer may call this; concurrent ticks on the same feed
    /// would break the single-writer contract of the buffer.
    pub fn tick(&self) -> u64 {
        let sequence = self.next_sequence.load(Ordering::Acquire);
        self.buffer.append(Item::produce(sequence, self.mode));
        self.next_sequence.store(sequence + 1, Ordering::Release);
        sequence
    }

    /// Retained items newer than `cursor`, in wire form.
    pub fn records_from(&self, cursor: u64) -> Vec<ItemRecord> {
        self.buffer
            .read_from(cursor)
            .iter()
            .map(|item| item.to_record(&self.path))
            .collect()
    }

    /// # Producer Loop
    ///
    /// Ticks, then sleeps for `interval`, until `token` is cancelled. The
    /// sleep races the token so cancellation takes effect immediately.
    pub async fn run(self: Arc<Self>, token: CancellationToken) {
        info!(
            feed = %self.name,
            mode = %self.mode,
            interval_ms = self.interval.as_millis() as u64,
            capacity = self.buffer.capacity(),
            "Producer started"
        );

        loop {
            let sequence = self.tick();
            debug!(feed = %self.name, sequence, "Produced item");

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(feed = %self.name, produced = self.next_sequence(), "Producer stopped");
    }
}
