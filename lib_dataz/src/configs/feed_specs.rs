use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::ConfigError;
use crate::feeds::GenerationMode;

/// Default ring buffer capacity.
pub const DEFAULT_CAPACITY: usize = 8;

/// One configured feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpec {
    /// Routing name, must be a single path segment.
    pub name: String,
    /// Payload synthesis mode.
    pub mode: GenerationMode,
    /// Production interval.
    pub interval: Duration,
    /// Ring buffer capacity.
    pub capacity: usize,
}

impl FromStr for FeedSpec {
    type Err = ConfigError;

    /// Parses `name:mode:interval_ms:capacity`, e.g. `fast:random-numbers:1000:8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [name, mode, interval_ms, capacity] = parts.as_slice() else {
            return Err(ConfigError::MalformedFeed(s.to_string()));
        };

        let invalid = |field| ConfigError::InvalidFeedField {
            spec: s.to_string(),
            field,
        };

        if name.is_empty() || name.contains('/') {
            return Err(invalid("name"));
        }
        let mode: GenerationMode = mode.parse()?;
        let interval_ms: u64 = interval_ms
            .parse()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| invalid("interval"))?;
        let capacity: usize = capacity
            .parse()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| invalid("capacity"))?;

        Ok(FeedSpec {
            name: name.to_string(),
            mode,
            interval: Duration::from_millis(interval_ms),
            capacity,
        })
    }
}

impl fmt::Display for FeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.name,
            self.mode,
            self.interval.as_millis(),
            self.capacity
        )
    }
}

/// Parses a comma separated list of feed definitions. Empty entries are skipped.
pub fn parse_feed_specs(list: &str) -> Result<Vec<FeedSpec>, ConfigError> {
    list.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// The three stock feeds: `fast` (random digits, 1s), `medium` (random
/// letters, 2s) and `slow` (sawing digits, 4s).
pub fn default_feed_specs() -> Vec<FeedSpec> {
    vec![
        FeedSpec {
            name: "fast".to_string(),
            mode: GenerationMode::RandomNumbers,
            interval: Duration::from_secs(1),
            capacity: DEFAULT_CAPACITY,
        },
        FeedSpec {
            name: "medium".to_string(),
            mode: GenerationMode::RandomLetters,
            interval: Duration::from_secs(2),
            capacity: DEFAULT_CAPACITY,
        },
        FeedSpec {
            name: "slow".to_string(),
            mode: GenerationMode::SawingNumbers,
            interval: Duration::from_secs(4),
            capacity: DEFAULT_CAPACITY,
        },
    ]
}
