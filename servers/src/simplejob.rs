//! # Simple Job
//!
//! A one-shot consumer: fetches its job config from the scheduler, drains
//! the configured feed with a `CursorPoller` until enough items have been
//! collected, and prints the report. A poll fault ends the run with an error;
//! there is no retry at this level.

use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use lib_dataz::ingestors::{CursorPoller, PollerOptions, format_report, retrieve_config};

mod dataz_logic;
use dataz_logic::{logging::LogArgs, shutdown::shutdown_signal};

/// # Poller Job Configuration
#[derive(Parser, Debug, Clone)]
#[clap(about = "Drains one feed with a cursor poller and prints what it collected.", version)]
struct JobArgs {
    #[clap(long, env = "JOB", default_value = "/jobs/123", help = "Job name.")]
    job: String,

    #[clap(
        long,
        env = "SCHEDULER_SERVICE",
        default_value = "http://localhost:8080",
        help = "Base URL of the scheduler service."
    )]
    scheduler_service: String,

    #[clap(long, env = "POLL_INTERVAL_MS", default_value_t = 1000, help = "Pause between polls in milliseconds.")]
    poll_interval_ms: u64,

    #[clap(long, env = "POLL_THRESHOLD", default_value_t = 16, help = "Number of items to collect before stopping.")]
    threshold: usize,

    #[clap(long, env = "POLL_TIMEOUT_MS", default_value_t = 10_000, help = "Per-request transport timeout in milliseconds.")]
    request_timeout_ms: u64,

    #[clap(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = JobArgs::parse();
    let _guard = args.log.init("simplejob");

    let config = retrieve_config(&args.scheduler_service, &args.job).await?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(args.request_timeout_ms))
        .build()?;
    let options = PollerOptions {
        interval: Duration::from_millis(args.poll_interval_ms),
        threshold: args.threshold,
    };
    let poller = CursorPoller::with_client(config.clone(), options, client);

    let items = tokio::select! {
        result = poller.run() => result?,
        _ = shutdown_signal() => {
            warn!("Interrupted before the threshold was reached.");
            return Ok(());
        }
    };

    info!(job = %args.job, received = items.len(), "Job finished");
    print!("{}", format_report(&config, &items));
    Ok(())
}
