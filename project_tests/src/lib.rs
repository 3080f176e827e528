//! # Project Test Support
//!
//! Shared helpers for the integration tests under `tests/`: binding real axum
//! servers on ephemeral loopback ports and building small feed registries
//! that the tests drive by hand.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use lib_dataz::configs::FeedSpec;
use lib_dataz::feeds::{FeedRegistry, GenerationMode};
use lib_dataz::jobs::JobConfig;

/// Serves `router` on `127.0.0.1:<ephemeral>` in a background task and
/// returns the bound address.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });
    addr
}

/// A feed definition for tests.
pub fn feed_spec(name: &str, mode: GenerationMode, interval_ms: u64, capacity: usize) -> FeedSpec {
    FeedSpec {
        name: name.to_string(),
        mode,
        interval: Duration::from_millis(interval_ms),
        capacity,
    }
}

/// A registry whose feeds are never started; tests call `tick` themselves.
pub fn manual_registry(specs: &[FeedSpec]) -> Arc<FeedRegistry> {
    Arc::new(FeedRegistry::from_specs(specs).expect("Invalid test feed specs"))
}

/// A job config pointing at feed `feed` of the server at `addr`.
pub fn job_config_for(addr: SocketAddr, feed: &str, mode: GenerationMode) -> JobConfig {
    JobConfig {
        name: format!("/configs/{}", feed),
        dataz: format!("http://{}", addr),
        stream: format!("/streams/{}", feed),
        d_type: mode,
    }
}
