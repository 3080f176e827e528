//! # Data Ingestors Module
//!
//! The consumption side of the system. An ingestor fetches its job
//! configuration once, drains the configured feed with a cursor-based poll
//! loop, and hands what it collected to a report formatter.
//!
//! ## Contained Modules:
//! - **`cursor_polling`**: the `CursorPoller` and its error type.
//! - **`job_config`**: one-shot config retrieval from the scheduler service.
//! - **`report`**: rendering of the collected items.

/// The self-scheduling cursor poller.
pub mod cursor_polling;
/// Job config retrieval.
pub mod job_config;
/// Report formatting.
pub mod report;

// --- Public API Re-exports ---
pub use cursor_polling::{CursorPoller, PollerError, PollerOptions};
pub use job_config::retrieve_config;
pub use report::format_report;
