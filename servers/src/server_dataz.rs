//! # Dataz Feed Server
//!
//! Runs a set of bounded item feeds and serves them over HTTP. Each feed has
//! a background producer appending one item per tick to a fixed-capacity
//! ring buffer; clients poll `GET /streams/{feed}/items?from=N` for whatever
//! is still retained after their cursor.
//!
//! ## Execution Flow:
//! 1.  Load `.env`, parse flags / environment, set up logging.
//! 2.  Build the `FeedRegistry` from the configured feed list.
//! 3.  Spawn one producer task per feed under a shared `CancellationToken`.
//! 4.  Serve the poll endpoint until Ctrl-C / SIGTERM, then stop the
//!     producers and wait for them.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use lib_dataz::configs::{FeedSpec, default_feed_specs};
use lib_dataz::feeds::FeedRegistry;
use lib_dataz::server::feed_router;

mod dataz_logic;
use dataz_logic::{logging::LogArgs, shutdown::shutdown_signal};

/// # Feed Service Configuration
///
/// Parsed from command-line arguments and environment variables.
#[derive(Parser, Debug, Clone)]
#[clap(about = "Serves bounded, overwrite-on-full item feeds over HTTP.", version)]
struct DatazConfig {
    #[clap(long, env = "PORT", default_value_t = 8081, help = "HTTP server port.")]
    port: u16,

    #[clap(
        long,
        env = "DATAZ_FEEDS",
        value_delimiter = ',',
        help = "Feeds to run, as name:mode:interval_ms:capacity (comma separated). Defaults to fast, medium and slow."
    )]
    feeds: Vec<FeedSpec>,

    #[clap(flatten)]
    log: LogArgs,
}

impl DatazConfig {
    /// Configured feeds, or the stock set when none was given.
    fn feed_specs(&self) -> Vec<FeedSpec> {
        if self.feeds.is_empty() {
            default_feed_specs()
        } else {
            self.feeds.clone()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = DatazConfig::parse();
    let _guard = config.log.init("server_dataz");

    // --- Feeds ---
    let specs = config.feed_specs();
    for spec in &specs {
        info!(feed = %spec, "Configured feed");
    }
    let registry = Arc::new(FeedRegistry::from_specs(&specs).context("Invalid feed configuration")?);

    let producers_token = CancellationToken::new();
    let producers = registry.spawn_producers(&producers_token);

    // --- HTTP ---
    let app = feed_router(registry.clone()).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Dataz feed server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Teardown ---
    producers_token.cancel();
    for producer in producers {
        producer.await?;
    }

    info!("Shutdown complete.");
    Ok(())
}
