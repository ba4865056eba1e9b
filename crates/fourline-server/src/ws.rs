//! `WebSocket` handler for game clients.
//!
//! Clients connect to `GET /ws`. Each text frame they send is decoded as a
//! [`ClientEvent`] and applied through the shared hub; each frame they
//! receive is an encoded [`ServerEvent`](fourline_types::ServerEvent).
//!
//! The socket is split: a writer task drains the connection's outbound
//! queue while this task reads. Malformed frames are logged and ignored.
//! When the client goes away the hub runs disconnect cleanup.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use fourline_types::ClientEvent;
use futures::{SinkExt as _, StreamExt as _};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a game `WebSocket`.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_play(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Drive one connection from accept to cleanup.
async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (id, mut inbox) = state.connect().await;
    info!(connection = %id, "New client connected");

    let (mut sink, mut stream) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(json) = inbox.recv().await {
            if sink.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket client disconnected (send failed)");
                return;
            }
        }
    });

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => state.dispatch(id, event).await,
                Err(e) => warn!(connection = %id, "Ignoring malformed client event: {e}"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {
                // Pings are answered by the protocol layer; binary frames
                // carry nothing we understand.
            }
            Err(e) => {
                debug!(connection = %id, "WebSocket error: {e}");
                break;
            }
        }
    }

    state.disconnect(id).await;
    writer.abort();
    info!(connection = %id, "Client disconnected");
}
