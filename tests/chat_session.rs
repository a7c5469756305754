//! Integration tests for WebSocket chat sessions.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

mod common;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &common::TestServer, query: &str) -> WsClient {
    let (ws, _) = connect_async(server.ws_url(query)).await.unwrap();
    ws
}

/// Next text frame, skipping control frames; panics after two seconds.
async fn next_text(ws: &mut WsClient) -> String {
    loop {
        let frame = timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        match frame {
            Message::Text(text) => return text.to_string(),
            Message::Ping(_) | Message::Pong(_) => {}
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

#[tokio::test]
async fn chat_roundtrip_between_two_clients() {
    let server = common::spawn_server(common::test_config()).await;
    let alice = common::obtain_token(&server, "alice").await;
    let bob = common::obtain_token(&server, "bob").await;

    let mut a = connect(&server, &format!("token={alice}&room=lobby")).await;
    assert_eq!(next_text(&mut a).await, "alice joined lobby");

    let mut b = connect(&server, &format!("token={bob}&room=lobby")).await;
    assert_eq!(next_text(&mut b).await, "bob joined lobby");
    assert_eq!(next_text(&mut a).await, "bob joined lobby");

    a.send(Message::text("hello")).await.unwrap();
    assert_eq!(next_text(&mut a).await, "alice: hello");
    assert_eq!(next_text(&mut b).await, "alice: hello");

    b.close(None).await.unwrap();
    assert_eq!(next_text(&mut a).await, "bob left lobby");
}

#[tokio::test]
async fn history_is_replayed_to_late_joiners() {
    let server = common::spawn_server(common::test_config()).await;
    let alice = common::obtain_token(&server, "alice").await;

    let mut a = connect(&server, &format!("token={alice}&room=archive")).await;
    assert_eq!(next_text(&mut a).await, "alice joined archive");

    for body in ["one", "two", "three"] {
        a.send(Message::text(body)).await.unwrap();
        assert_eq!(next_text(&mut a).await, format!("alice: {body}"));
    }

    a.close(None).await.unwrap();
    drop(a);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let bob = common::obtain_token(&server, "bob").await;
    let mut b = connect(&server, &format!("token={bob}&room=archive")).await;

    // Replay first (chat lines only, no join/leave notices), then the
    // live join notice.
    assert_eq!(next_text(&mut b).await, "alice: one");
    assert_eq!(next_text(&mut b).await, "alice: two");
    assert_eq!(next_text(&mut b).await, "alice: three");
    assert_eq!(next_text(&mut b).await, "bob joined archive");
}

#[tokio::test]
async fn rooms_are_isolated() {
    let server = common::spawn_server(common::test_config()).await;
    let alice = common::obtain_token(&server, "alice").await;
    let bob = common::obtain_token(&server, "bob").await;

    let mut red = connect(&server, &format!("token={alice}&room=red")).await;
    assert_eq!(next_text(&mut red).await, "alice joined red");
    let mut blue = connect(&server, &format!("token={bob}&room=blue")).await;
    assert_eq!(next_text(&mut blue).await, "bob joined blue");

    red.send(Message::text("ping")).await.unwrap();
    assert_eq!(next_text(&mut red).await, "alice: ping");

    // Nothing crosses over to the other room.
    assert!(timeout(Duration::from_millis(300), blue.next()).await.is_err());
}

#[tokio::test]
async fn missing_room_falls_back_to_default() {
    let server = common::spawn_server(common::test_config()).await;
    let alice = common::obtain_token(&server, "alice").await;

    let mut ws = connect(&server, &format!("token={alice}")).await;
    assert_eq!(next_text(&mut ws).await, "alice joined default");
}

#[tokio::test]
async fn invalid_token_closes_with_policy_violation() {
    let server = common::spawn_server(common::test_config()).await;

    let mut ws = connect(&server, "token=garbage&room=lobby").await;
    match timeout(Duration::from_secs(2), ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap()
    {
        Message::Close(Some(frame)) => assert_eq!(frame.code, CloseCode::Policy),
        other => panic!("expected close frame, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_token_closes_with_policy_violation() {
    let server = common::spawn_server(common::test_config()).await;

    let mut ws = connect(&server, "room=lobby").await;
    match timeout(Duration::from_secs(2), ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap()
    {
        Message::Close(Some(frame)) => assert_eq!(frame.code, CloseCode::Policy),
        other => panic!("expected close frame, got {other:?}"),
    }
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let mut config = common::test_config();
    config.auth.token_ttl_minutes = 1;
    let server = common::spawn_server(config).await;

    // A token signed with a different secret is as dead as an expired one
    // from the server's point of view; both fail verification.
    let forged = chat_relay::auth::token::issue("alice", b"wrong-secret", 30).unwrap();
    let mut ws = connect(&server, &format!("token={forged}&room=lobby")).await;
    match timeout(Duration::from_secs(2), ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap()
    {
        Message::Close(Some(frame)) => assert_eq!(frame.code, CloseCode::Policy),
        other => panic!("expected close frame, got {other:?}"),
    }
}
