//! WebSocket chat sessions.
//!
//! # Responsibilities
//! - Authenticate the upgrade via the `token` query parameter
//! - Replay recent room history to the joining client
//! - Relay frames between the client and the room broadcast channel
//! - Announce joins and leaves to the room
//!
//! # Data Flow
//! ```text
//! Client ── text frame ──→ session ──→ history.append ──→ room broadcast
//! Client ←─ text frame ─── session ←────────────────────── room broadcast
//! ```
//!
//! # Design Decisions
//! - Invalid tokens complete the upgrade, then close with 1008 (policy
//!   violation), so WebSocket clients see a proper close frame
//! - Join/leave notices are broadcast but not recorded in history
//! - A lagging client misses frames rather than stalling the room

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::auth::token;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query parameters accepted by the `/ws` endpoint.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Access token from /login. Missing or invalid closes the socket.
    pub token: Option<String>,
    /// Room to join; the configured default room when absent.
    pub room: Option<String>,
}

/// Upgrade handler for `GET /ws`.
pub async fn chat_ws(
    State(state): State<AppState>,
    Query(params): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| chat_session(socket, state, params))
}

async fn chat_session(mut socket: WebSocket, state: AppState, params: WsQuery) {
    let config = state.config.load_full();

    let verified = params
        .token
        .as_deref()
        .map(|t| token::verify(t, config.auth.jwt_secret.as_bytes()));

    let username = match verified {
        Some(Ok(username)) => username,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "WebSocket join rejected");
            close_policy_violation(&mut socket, "invalid token").await;
            return;
        }
        None => {
            tracing::warn!("WebSocket join rejected, no token supplied");
            close_policy_violation(&mut socket, "missing token").await;
            return;
        }
    };

    let room = params
        .room
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| config.chat.default_room.clone());
    let session = Uuid::new_v4();

    tracing::info!(session = %session, user = %username, room = %room, "Chat session started");
    metrics::record_session_opened(&room);

    // Subscribe before replay so lines published meanwhile are not lost.
    let (room_tx, mut room_rx) = state.rooms.join(&room);

    for line in state.history.recent(&room, config.chat.replay_count) {
        if socket.send(Message::Text(line.into())).await.is_err() {
            drop(room_rx);
            state.rooms.leave(&room);
            metrics::record_session_closed(&room);
            return;
        }
    }

    let _ = room_tx.send(format!("{username} joined {room}"));

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            published = room_rx.recv() => match published {
                Ok(line) => {
                    if sink.send(Message::Text(line.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(
                        session = %session,
                        user = %username,
                        room = %room,
                        missed,
                        "Client lagging, dropped broadcast frames"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let line = format!("{username}: {}", text.as_str());
                    let limits = state.config.load();
                    state.history.append(&room, &line, limits.chat.history_capacity);
                    metrics::record_chat_message(&room);
                    let _ = room_tx.send(line);
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // ping/pong/binary: nothing to relay
                Some(Err(e)) => {
                    tracing::debug!(session = %session, error = %e, "WebSocket read error");
                    break;
                }
            },
        }
    }

    drop(room_rx);
    let _ = room_tx.send(format!("{username} left {room}"));
    state.rooms.leave(&room);

    metrics::record_session_closed(&room);
    tracing::info!(session = %session, user = %username, room = %room, "Chat session ended");
}

async fn close_policy_violation(socket: &mut WebSocket, reason: &'static str) {
    let _ = socket
        .send(Message::Close(Some(CloseFrame {
            code: close_code::POLICY,
            reason: reason.into(),
        })))
        .await;
}
