//! `CursorPoller` against real feed servers.

use std::time::Duration;

use axum::{Router, routing::get};
use tokio_util::sync::CancellationToken;

use lib_dataz::feeds::GenerationMode;
use lib_dataz::ingestors::{CursorPoller, PollerError, PollerOptions};
use lib_dataz::server::feed_router;
use project_tests::{feed_spec, job_config_for, manual_registry, spawn_server};

fn options(interval_ms: u64, threshold: usize) -> PollerOptions {
    PollerOptions {
        interval: Duration::from_millis(interval_ms),
        threshold,
    }
}

#[tokio::test]
async fn cursor_advances_to_last_received_sequence() {
    let registry = manual_registry(&[feed_spec("slow", GenerationMode::SawingNumbers, 4000, 8)]);
    let feed = registry.get("slow").unwrap().clone();
    let addr = spawn_server(feed_router(registry)).await;
    let config = job_config_for(addr, "slow", GenerationMode::SawingNumbers);
    let mut poller = CursorPoller::new(config, options(10, 100));

    // Nothing produced yet.
    assert_eq!(poller.poll_once().await.unwrap(), 0);
    assert_eq!(poller.cursor(), 0);

    for _ in 0..4 {
        feed.tick();
    }
    assert_eq!(poller.poll_once().await.unwrap(), 3);
    assert_eq!(poller.cursor(), 3);

    // No new items: cursor stays put.
    assert_eq!(poller.poll_once().await.unwrap(), 0);
    assert_eq!(poller.cursor(), 3);

    for _ in 0..2 {
        feed.tick();
    }
    assert_eq!(poller.poll_once().await.unwrap(), 2);
    assert_eq!(poller.cursor(), 5);

    let seen: Vec<u64> = poller.accumulated().iter().map(|i| i.n).collect();
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    assert!(!poller.is_done());
}

#[tokio::test]
async fn slow_poller_loses_evicted_items_but_never_repeats() {
    let registry = manual_registry(&[feed_spec("fast", GenerationMode::RandomNumbers, 1000, 8)]);
    let feed = registry.get("fast").unwrap().clone();
    let addr = spawn_server(feed_router(registry)).await;
    let mut poller = CursorPoller::new(
        job_config_for(addr, "fast", GenerationMode::RandomNumbers),
        options(10, 100),
    );

    for _ in 0..3 {
        feed.tick();
    }
    poller.poll_once().await.unwrap();
    assert_eq!(poller.cursor(), 2);

    // Twenty appends into capacity 8 while the poller is away.
    for _ in 0..20 {
        feed.tick();
    }
    assert_eq!(poller.poll_once().await.unwrap(), 8);

    let seen: Vec<u64> = poller.accumulated().iter().map(|i| i.n).collect();
    assert_eq!(seen, vec![1, 2, 15, 16, 17, 18, 19, 20, 21, 22]);
}

#[tokio::test]
async fn run_against_live_producer_reaches_threshold_without_duplicates() {
    let registry = manual_registry(&[feed_spec("fast", GenerationMode::RandomNumbers, 5, 8)]);
    let token = CancellationToken::new();
    let producers = registry.spawn_producers(&token);
    let addr = spawn_server(feed_router(registry)).await;

    let poller = CursorPoller::new(
        job_config_for(addr, "fast", GenerationMode::RandomNumbers),
        options(20, 16),
    );
    let items = tokio::time::timeout(Duration::from_secs(10), poller.run())
        .await
        .expect("poller did not reach its threshold")
        .unwrap();

    token.cancel();
    for handle in producers {
        handle.await.unwrap();
    }

    assert!(items.len() >= 16);
    assert!(items.windows(2).all(|w| w[0].n < w[1].n), "not strictly increasing");
    assert!(items.iter().all(|i| i.n > 0));
    for item in &items {
        assert_eq!(item.name, format!("/streams/fast/items/{}", item.n));
        assert_eq!(item.data.len(), 1);
        assert!(item.data[0] <= 9);
    }
}

#[tokio::test]
async fn unknown_feed_is_a_status_fault() {
    let registry = manual_registry(&[feed_spec("fast", GenerationMode::RandomNumbers, 1000, 8)]);
    let addr = spawn_server(feed_router(registry)).await;
    let mut poller = CursorPoller::new(
        job_config_for(addr, "bogus", GenerationMode::RandomNumbers),
        options(10, 16),
    );

    match poller.poll_once().await {
        Err(PollerError::Status { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/streams/bogus/items"));
        }
        other => panic!("expected a status fault, got {:?}", other),
    }

    // run() surfaces the same fault instead of retrying.
    let err = poller.run().await.unwrap_err();
    assert!(matches!(err, PollerError::Status { status: 404, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_fault() {
    let router = Router::new()
        .route("/streams/garbled/items", get(|| async { "{\"not\": \"a list\"" }))
        .route("/streams/quiet/items", get(|| async { "" }));
    let addr = spawn_server(router).await;

    let mut poller = CursorPoller::new(
        job_config_for(addr, "garbled", GenerationMode::RandomLetters),
        options(10, 16),
    );
    let err = poller.poll_once().await.unwrap_err();
    assert!(matches!(err, PollerError::Decode { .. }));
    assert_eq!(poller.cursor(), 0);
    assert!(poller.accumulated().is_empty());

    // An empty body is an empty batch.
    let mut poller = CursorPoller::new(
        job_config_for(addr, "quiet", GenerationMode::RandomLetters),
        options(10, 16),
    );
    assert_eq!(poller.poll_once().await.unwrap(), 0);
}
