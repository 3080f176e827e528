//! # Configuration Module
//!
//! Parsing and validation of the static configuration the services start
//! from: the list of feeds a feed service runs, and the errors raised while
//! reading it. Process-level wiring (ports, env vars, flags) lives in the
//! binaries; this module only turns strings into typed values.

/// Feed definitions, `name:mode:interval_ms:capacity`.
pub mod feed_specs;

pub use feed_specs::{default_feed_specs, parse_feed_specs, FeedSpec};

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown generation mode code: {0}")]
    UnknownModeCode(u8),

    #[error("Unknown generation mode: {0}")]
    UnknownModeName(String),

    #[error("Malformed feed definition '{0}': expected name:mode:interval_ms:capacity")]
    MalformedFeed(String),

    #[error("Invalid {field} in feed definition '{spec}'")]
    InvalidFeedField { spec: String, field: &'static str },

    #[error("Feed '{0}' is defined more than once")]
    DuplicateFeed(String),
}
