use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use chrono::Utc;
use civic_events::{ChangeFeed, EventFilter, RowChange, Table};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::state::AppState;
use crate::ws::manager::{WsManager, WsSender};

/// Query parameters for `GET /api/v1/ws`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WsParams {
    /// `complaints`, `notifications` or `activity_logs`.
    pub table: Table,
    /// `INSERT`, `UPDATE` or `*` (default).
    #[serde(default)]
    pub event: EventFilter,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// An unknown `table` or `event` is rejected with 400 before the upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, params, state.ws_manager, state.feed))
}

/// Manage a single WebSocket connection after upgrade.
///
/// 1. Registers the connection with `WsManager`.
/// 2. Subscribes to the change feed; the callback queues each change as a
///    JSON text frame.
/// 3. Spawns a sender task that drains the queue into the socket.
/// 4. Reads inbound frames until the client goes away, then unsubscribes.
async fn handle_socket(
    socket: WebSocket,
    params: WsParams,
    ws_manager: Arc<WsManager>,
    feed: Arc<ChangeFeed>,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let (tx, mut rx) = ws_manager
        .add(conn_id.clone(), params.table, params.event)
        .await;
    let watching = ws_manager.count_for_table(params.table).await;
    tracing::info!(
        conn_id = %conn_id,
        table = %params.table,
        filter = ?params.event,
        watching = watching,
        "WebSocket connected",
    );

    let subscription = feed.subscribe(params.table, params.event, relay_to(tx));

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            // The relay is one-way.
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    subscription.unsubscribe().await;
    let connected_for = ws_manager
        .remove(&conn_id)
        .await
        .map(|c| (Utc::now() - c.connected_at).num_seconds());
    send_task.abort();
    tracing::info!(conn_id = %conn_id, ?connected_for, "WebSocket disconnected");
}

/// Change-feed callback that serializes each change onto a connection's
/// outbound queue.
pub(crate) fn relay_to(tx: WsSender) -> impl FnMut(RowChange) + Send + 'static {
    move |change: RowChange| match serde_json::to_string(&change) {
        Ok(text) => {
            // A closed queue means the socket is already going away.
            let _ = tx.send(Message::Text(text.into()));
        }
        Err(e) => {
            tracing::warn!(table = %change.table, error = %e, "Failed to encode row change");
        }
    }
}
