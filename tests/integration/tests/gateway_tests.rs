//! Gateway Integration Tests
//!
//! Drives `GatewayClient` against the in-process REST API and gateway over
//! real HTTP and WebSocket connections.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use bot_gateway::{ConnectionState, GatewayClient, GatewayError};
use integration_tests::{fixtures::*, MockGateway, MockRestApi};
use serde_json::json;
use tokio::sync::mpsc;

struct Setup {
    rest: MockRestApi,
    gateway: MockGateway,
    client: GatewayClient,
}

async fn setup(heartbeat_interval_ms: u64) -> Setup {
    let rest = MockRestApi::start().await.expect("Failed to start REST mock");
    let gateway = MockGateway::start(heartbeat_interval_ms)
        .await
        .expect("Failed to start gateway mock");
    rest.set_gateway_url(gateway.url());

    let client = GatewayClient::new(test_config(&rest.base_url())).expect("Failed to build client");

    Setup {
        rest,
        gateway,
        client,
    }
}

async fn wait_for_state(client: &GatewayClient, target: ConnectionState) {
    let mut rx = client.subscribe_state();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| *s == target))
        .await
        .expect("Timed out waiting for state")
        .expect("State channel closed");
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[tokio::test]
async fn test_login_discovers_and_identifies() {
    let Setup {
        rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    client.login().await.expect("login failed");

    let identify = gateway.expect_op(2).await.unwrap();
    assert_eq!(identify["d"]["token"], TEST_TOKEN);
    assert_eq!(identify["d"]["intents"], 33_281);
    assert_eq!(identify["d"]["properties"]["$browser"], "integration-bot");
    assert_eq!(identify["d"]["properties"]["$device"], "integration-bot");
    assert_eq!(
        identify["d"]["presence"],
        json!({"status": "online", "afk": false})
    );

    // Discovery went through the REST API with the bot token
    let discovery = &rest.requests()[0];
    assert_eq!(discovery.method, "GET");
    assert_eq!(discovery.path, "/api/v10/gateway/bot");
    assert_eq!(
        discovery.authorization.as_deref(),
        Some(format!("Bot {TEST_TOKEN}").as_str())
    );

    assert_eq!(
        gateway.request_uri().as_deref(),
        Some("/?v=10&encoding=json")
    );

    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_heartbeats_follow_hello_interval() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(100).await;

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    for _ in 0..3 {
        let heartbeat = gateway.expect_op(1).await.unwrap();
        assert_eq!(heartbeat, json!({"op": 1, "d": null}));
    }

    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_ready_dispatch_reaches_handler() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    client.on("READY", move |payload| {
        tx.send(payload).ok();
    });

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    gateway.dispatch("READY", 1, ready_payload());

    let received = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received, ready_payload());
    wait_for_state(&client, ConnectionState::Connected).await;

    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_unknown_and_malformed_frames_do_not_end_session() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    let (err_tx, mut err_rx) = mpsc::unbounded_channel();
    client.on_error(move |e| {
        err_tx.send(e.to_string()).ok();
    });
    let (tx, mut rx) = mpsc::unbounded_channel();
    client.on("MESSAGE_CREATE", move |payload| {
        tx.send(payload).ok();
    });

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    gateway.send(json!({"op": 7, "d": null}));
    gateway.send(json!({"op": 0, "d": {}}));
    gateway.dispatch("TYPING_START", 1, json!({}));
    gateway.dispatch("MESSAGE_CREATE", 2, json!({"id": "1", "content": "hi"}));

    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(message["content"], "hi");

    let error = err_rx.try_recv().expect("malformed frame should be reported");
    assert!(error.contains("Malformed"));

    assert!(client.state().is_open());
    client.disconnect().await.unwrap();
}

// ============================================================================
// Status Tests
// ============================================================================

#[tokio::test]
async fn test_status_sends_presence_update() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    client.status("dnd").await.unwrap();

    let update = gateway.expect_op(3).await.unwrap();
    assert_eq!(update, json!({"op": 3, "d": {"status": "dnd", "afk": false}}));

    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_status_rejects_invalid_value() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    let err = client.status("busy").await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidArgument(_)));

    client.disconnect().await.unwrap();
    gateway.expect_disconnect().await.unwrap();
}

#[tokio::test]
async fn test_status_before_login() {
    let Setup { client, .. } = setup(41_250).await;

    let err = client.status("idle").await.unwrap_err();
    assert!(matches!(err, GatewayError::NotConnected));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_login_without_token_makes_no_request() {
    let rest = MockRestApi::start().await.unwrap();
    let mut client = GatewayClient::new(test_config(&rest.base_url()).with_token(""))
        .unwrap();

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, GatewayError::MissingCredential));
    assert!(rest.requests().is_empty());
}

#[tokio::test]
async fn test_discovery_rejected_token() {
    let rest = MockRestApi::start().await.unwrap();
    let mut client =
        GatewayClient::new(test_config(&rest.base_url()).with_token("wrong-token")).unwrap();

    let err = client.login().await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::ConnectionFailure {
            stage: "discovery",
            ..
        }
    ));
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_server_close_is_reported() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    gateway.close(4004, "Authentication failed.");

    let err = tokio::time::timeout(Duration::from_secs(5), client.wait())
        .await
        .unwrap()
        .unwrap_err();

    match err {
        GatewayError::Closed { code, reason } => {
            assert_eq!(code, Some(4004));
            assert_eq!(reason, "Authentication failed.");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_disconnect_closes_socket() {
    let Setup {
        rest: _rest,
        mut gateway,
        mut client,
    } = setup(41_250).await;

    client.login().await.unwrap();
    gateway.expect_op(2).await.unwrap();

    client.disconnect().await.unwrap();
    assert_eq!(client.state(), ConnectionState::Disconnected);

    gateway.expect_disconnect().await.unwrap();
}
