//! # Logging Setup
//!
//! Configures the global `tracing` subscriber for the dataz binaries:
//!
//! - The filter comes from `RUST_LOG` when set, otherwise from the configured
//!   level (defaults to "info").
//! - Console output is human-readable with ANSI colors and targets.
//! - File output is JSON, written through a non-blocking, daily rotating
//!   appender into `log_dir`, one file family per application name.

use std::io;
use std::path::Path;

use tracing::info;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter: `RUST_LOG` wins, then `log_level`, then "info".
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// # Setup Logging
///
/// Installs the console and JSON file layers. The returned `WorkerGuard`
/// flushes the file writer on drop; keep it alive in `main`.
///
/// # Errors
/// Fails if `log_dir` cannot be created or a global subscriber is already set.
pub fn setup_logging(app_name: &str, log_dir: &Path, log_level: &str) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, app_name);
    let (non_blocking_appender, guard) = non_blocking(file_appender);

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_appender)
        .json();

    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    info!(app = app_name, level = log_level, dir = %log_dir.display(), "Logging initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_creates_the_log_directory_and_writes_json() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let log_dir = temp_dir.path().join("logs");

        let guard = setup_logging("dataz_test", &log_dir, "info").expect("logging setup");
        tracing::info!(feed = "fast", "hello from the test");
        drop(guard);

        let files: Vec<_> = std::fs::read_dir(&log_dir)
            .expect("Failed to read log directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        assert_eq!(files.len(), 1);

        let content = std::fs::read_to_string(&files[0]).unwrap();
        let line = content
            .lines()
            .find(|l| l.contains("hello from the test"))
            .expect("test line in log file");
        let json: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(json["fields"]["feed"], "fast");

        // A second global subscriber is refused.
        assert!(setup_logging("dataz_test", &log_dir, "info").is_err());
    }
}
