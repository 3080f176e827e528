//! # Job Scheduler Server
//!
//! Serves the static job table: `GET /jobs/{id}/configs` returns the
//! `JobConfig` a poller needs to find its feed. The table points the stock
//! jobs at the feed service given by `DATAZ_SERVICE`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::info;

use lib_dataz::jobs::JobRegistry;
use lib_dataz::server::scheduler_router;

mod dataz_logic;
use dataz_logic::{logging::LogArgs, shutdown::shutdown_signal};

/// # Scheduler Service Configuration
#[derive(Parser, Debug, Clone)]
#[clap(about = "Serves job configurations to pollers.", version)]
struct SchedulerConfig {
    #[clap(long, env = "PORT", default_value_t = 8080, help = "HTTP server port.")]
    port: u16,

    #[clap(
        long,
        env = "DATAZ_SERVICE",
        default_value = "http://localhost:8081",
        help = "Base URL of the feed service the jobs point at."
    )]
    dataz_service: String,

    #[clap(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = SchedulerConfig::parse();
    let _guard = config.log.init("server_scheduler");

    let registry = Arc::new(JobRegistry::with_defaults(&config.dataz_service));
    info!(jobs = registry.len(), dataz = %config.dataz_service, "Job table loaded");

    let app = scheduler_router(registry).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Scheduler listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete.");
    Ok(())
}
