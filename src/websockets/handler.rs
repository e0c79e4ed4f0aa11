use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::shared::AppState;

/// WebSocket endpoint: GET /ws
///
/// Each connection gets a fresh uuid as its identity; room membership comes
/// later through join-game messages on the socket itself.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Outbound channel (app -> client), pumped by a dedicated task so that
    // broadcasts never block on a slow socket
    let (outbound_sender, mut outbound_receiver) = mpsc::unbounded_channel::<String>();
    let (mut ws_sender, mut ws_receiver) = socket.split();

    app_state
        .connection_manager
        .add_connection(connection_id.clone(), outbound_sender)
        .await;

    let send_task = tokio::spawn(async move {
        while let Some(message) = outbound_receiver.recv().await {
            if ws_sender.send(Message::Text(message)).await.is_err() {
                break;
            }
        }
    });

    // Inbound loop: runs until the client closes or the socket errors
    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                app_state.gateway.handle_message(&connection_id, &text).await;
            }
            Ok(Message::Close(_)) => {
                debug!(connection_id = %connection_id, "Client sent close frame");
                break;
            }
            Ok(_) => {
                // Binary/ping/pong frames carry no game events
            }
            Err(e) => {
                debug!(connection_id = %connection_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Cleanup: unregister the connection, stop the pump, then run the
    // disconnect sweep so remaining rooms get their updated snapshots
    app_state
        .connection_manager
        .remove_connection(&connection_id)
        .await;
    send_task.abort();

    if let Err(e) = app_state.gateway.handle_disconnect(&connection_id).await {
        warn!(
            connection_id = %connection_id,
            error = %e,
            "Disconnect handling failed"
        );
    }

    info!(connection_id = %connection_id, "WebSocket connection closed");
}
