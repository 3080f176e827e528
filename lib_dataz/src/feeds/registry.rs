//! # Feed Registry
//!
//! Immutable after construction: built once from the configured feed list by
//! the process's composition root and shared with the HTTP layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::feed::Feed;
use crate::configs::{ConfigError, FeedSpec};

/// # Feed Registry
///
/// Maps feed names (`fast`, `medium`, ...) to their `Feed`.
#[derive(Debug, Default)]
pub struct FeedRegistry {
    feeds: HashMap<String, Arc<Feed>>,
}

impl FeedRegistry {
    /// Builds one feed per spec. Duplicate names are rejected.
    pub fn from_specs(specs: &[FeedSpec]) -> Result<Self, ConfigError> {
        let mut feeds = HashMap::with_capacity(specs.len());
        for spec in specs {
            if feeds.contains_key(&spec.name) {
                return Err(ConfigError::DuplicateFeed(spec.name.clone()));
            }
            feeds.insert(spec.name.clone(), Arc::new(Feed::from_spec(spec)));
        }
        Ok(Self { feeds })
    }

    /// Looks a feed up by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Feed>> {
        self.feeds.get(name)
    }

    /// Registered feed names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.feeds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered feeds.
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    /// True when no feed is registered.
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Spawns one producer task per feed. All of them stop when `token` is
    /// cancelled.
    pub fn spawn_producers(&self, token: &CancellationToken) -> Vec<JoinHandle<()>> {
        info!(feeds = ?self.names(), "Spawning producers");
        self.feeds
            .values()
            .map(|feed| tokio::spawn(feed.clone().run(token.child_token())))
            .collect()
    }
}
