//! Integration tests for the prediction client
//!
//! These drive real subprocesses standing in for the engine: a `cat` echo
//! loop for query/response behavior and small shell scripts for the failure
//! modes, so no mocword installation or data set is required.

#![cfg(unix)]

use std::path::PathBuf;
use std::time::Duration;

use riceword_predict::{ClientState, EngineConfig, PredictionClient};
use tempfile::TempDir;

/// Write an executable engine stand-in that ignores the `--limit` flag
fn fake_engine(dir: &TempDir, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("engine.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write engine script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod engine script");
    path
}

fn engine_config(dir: &TempDir, body: &str) -> EngineConfig {
    EngineConfig::new(fake_engine(dir, body).to_string_lossy().into_owned())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Poll until the session notices its process is gone
async fn wait_for_terminated(client: &PredictionClient) {
    for _ in 0..200 {
        if client.state().await == ClientState::Terminated {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("client never reached Terminated");
}

#[tokio::test]
async fn test_query_round_trip() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exec cat"));

    client.start().await.expect("start echo engine");
    assert_eq!(client.state().await, ClientState::Ready);

    assert_eq!(client.query("camel Case Input").await, "camel Case Input");

    client.shutdown().await;
    assert_eq!(client.state().await, ClientState::Terminated);
}

#[tokio::test]
async fn test_sequential_queries_answered_in_order() {
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exec cat"));
    client.start().await.unwrap();

    for text in ["first", "second", "third"] {
        assert_eq!(client.query(text).await, text);
    }

    client.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_queries_keep_correlation() {
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exec cat"));
    client.start().await.unwrap();

    // With an echo engine every response equals its own query, so any
    // correlation slip between concurrent callers is observable directly.
    let (a, b, c) = tokio::join!(
        client.query("alpha"),
        client.query("beta"),
        client.query("gamma"),
    );
    assert_eq!(a, "alpha");
    assert_eq!(b, "beta");
    assert_eq!(c, "gamma");

    client.shutdown().await;
}

#[tokio::test]
async fn test_blank_response_line_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(
        &dir,
        "while read line; do echo; done",
    ));
    client.start().await.unwrap();

    assert_eq!(client.query("anything").await, "");
    // The session stays live: a blank line is a valid "no predictions".
    assert_eq!(client.state().await, ClientState::Ready);
    assert_eq!(client.query("more").await, "");

    client.shutdown().await;
}

#[tokio::test]
async fn test_engine_exit_degrades_to_empty() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exit 3"));
    client.start().await.unwrap();

    wait_for_terminated(&client).await;

    assert_eq!(client.query("hello").await, "");
    assert_eq!(client.query("world").await, "");
}

#[tokio::test]
async fn test_unresponsive_engine_times_out() {
    let dir = TempDir::new().unwrap();
    let config = engine_config(&dir, "while read line; do sleep 10; done").timeout_ms(100);
    let client = PredictionClient::new(config);
    client.start().await.unwrap();

    assert_eq!(client.query("hello").await, "");
    assert_eq!(client.state().await, ClientState::Terminated);

    client.shutdown().await;
}

#[tokio::test]
async fn test_missing_binary_fails_start() {
    let client = PredictionClient::new(EngineConfig::new("riceword-no-such-binary"));
    assert!(client.start().await.is_err());
    assert_eq!(client.state().await, ClientState::Terminated);
    assert_eq!(client.query("hello").await, "");
}

#[tokio::test]
async fn test_shutdown_then_query_returns_empty() {
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exec cat"));
    client.start().await.unwrap();
    client.shutdown().await;

    assert_eq!(client.query("hello").await, "");
}

#[tokio::test]
async fn test_start_after_termination_is_callers_choice() {
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exec cat"));

    client.start().await.unwrap();
    client.shutdown().await;
    assert_eq!(client.query("hello").await, "");

    // The session never restarts itself, but a fresh start() may.
    client.start().await.unwrap();
    assert_eq!(client.query("hello").await, "hello");

    client.shutdown().await;
}

#[tokio::test]
async fn test_start_while_running_is_rejected() {
    let dir = TempDir::new().unwrap();
    let client = PredictionClient::new(engine_config(&dir, "exec cat"));

    client.start().await.unwrap();
    assert!(client.start().await.is_err());
    // The live session is unaffected.
    assert_eq!(client.query("hello").await, "hello");

    client.shutdown().await;
}
