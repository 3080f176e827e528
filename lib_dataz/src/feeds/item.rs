//! # Items
//!
//! An `Item` is what a feed produces: a sequence number, a creation timestamp
//! and an opaque payload. Items are immutable once created. The display name
//! is not part of the stored value; it is derived from the feed path when the
//! item leaves the process as an `ItemRecord`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::configs::ConfigError;

/// # Generation Mode
///
/// Decides how a feed fills the payload of the items it produces. The set is
/// closed; it never changes control flow, only the bytes.
///
/// On the wire (job config records) a mode travels as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GenerationMode {
    /// Deterministic digits cycling 0 through 9, following the sequence number.
    SawingNumbers,
    /// A uniformly random digit 0 through 9.
    RandomNumbers,
    /// A uniformly random ASCII capital letter.
    RandomLetters,
}

impl GenerationMode {
    /// Synthesizes the payload for the item with sequence number `sequence`.
    pub fn generate(self, sequence: u64) -> Vec<u8> {
        match self {
            GenerationMode::SawingNumbers => vec![(sequence % 10) as u8],
            GenerationMode::RandomNumbers => vec![rand::rng().random_range(0..=9u8)],
            GenerationMode::RandomLetters => vec![rand::rng().random_range(b'A'..=b'Z')],
        }
    }

    /// The integer code used in job configuration records.
    pub fn code(self) -> u8 {
        match self {
            GenerationMode::SawingNumbers => 1,
            GenerationMode::RandomNumbers => 2,
            GenerationMode::RandomLetters => 3,
        }
    }

    /// The name used in configuration strings and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::SawingNumbers => "sawing-numbers",
            GenerationMode::RandomNumbers => "random-numbers",
            GenerationMode::RandomLetters => "random-letters",
        }
    }

    /// Renders a payload produced by this mode for humans.
    ///
    /// Number modes print the digit, the letter mode prints the character.
    pub fn render(self, payload: &[u8]) -> String {
        match self {
            GenerationMode::SawingNumbers | GenerationMode::RandomNumbers => payload
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(""),
            GenerationMode::RandomLetters => String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

impl TryFrom<u8> for GenerationMode {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(GenerationMode::SawingNumbers),
            2 => Ok(GenerationMode::RandomNumbers),
            3 => Ok(GenerationMode::RandomLetters),
            other => Err(ConfigError::UnknownModeCode(other)),
        }
    }
}

impl From<GenerationMode> for u8 {
    fn from(mode: GenerationMode) -> Self {
        mode.code()
    }
}

impl FromStr for GenerationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sawing-numbers" => Ok(GenerationMode::SawingNumbers),
            "random-numbers" => Ok(GenerationMode::RandomNumbers),
            "random-letters" => Ok(GenerationMode::RandomLetters),
            other => Err(ConfigError::UnknownModeName(other.to_string())),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Item
///
/// One produced value. Sequence numbers are strictly increasing per feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Position in the feed's production order, starting at 0.
    pub sequence: u64,
    /// Creation instant in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Mode-dependent payload bytes.
    pub payload: Vec<u8>,
}

impl Item {
    /// Creates the item with sequence number `sequence`, stamped with the
    /// current time and a payload synthesized by `mode`.
    pub fn produce(sequence: u64, mode: GenerationMode) -> Self {
        Self {
            sequence,
            timestamp: Utc::now().timestamp_millis(),
            payload: mode.generate(sequence),
        }
    }

    /// Converts the item into its wire form, deriving the display name from
    /// the path of the feed that produced it.
    pub fn to_record(&self, feed_path: &str) -> ItemRecord {
        ItemRecord {
            name: format!("{}/items/{}", feed_path, self.sequence),
            n: self.sequence,
            ts: self.timestamp,
            data: self.payload.clone(),
        }
    }
}

/// # Item Record
///
/// The JSON shape served by the poll endpoint and decoded by pollers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display name, `<feedPath>/items/<n>`.
    pub name: String,
    /// Sequence number.
    pub n: u64,
    /// Creation time in milliseconds since the Unix epoch.
    pub ts: i64,
    /// Payload bytes, serialized as a JSON array of numbers.
    pub data: Vec<u8>,
}

impl ItemRecord {
    /// The creation time as a UTC instant, if the timestamp is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.ts)
    }
}

impl fmt::Display for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: String = self.data.iter().map(|b| format!("{:02x}", b)).collect();
        match self.created_at() {
            Some(at) => write!(f, "{{{}: {} [{}]}}", self.name, at.to_rfc3339(), hex),
            None => write!(f, "{{{}: {} [{}]}}", self.name, self.ts, hex),
        }
    }
}
