//! WebSocket connection handlers (synchronization channel).

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Notification},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::{ConnectError, DriftTimer},
};

/// Upper bound for flushing the rejection message to a viewer that does not read
const REJECTION_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Capacity is enforced after the upgrade so the viewer gets an in-band error message
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives notifications from the rx channel and pushes them to the WebSocket sender.
///
/// When the channel closes, a close frame is sent: `1013 Try Again Later` after a
/// rejection, `1000 Normal Closure` otherwise.
///
/// # Arguments
///
/// * `rx` - Channel receiver for notifications addressed to this viewer
/// * `sender` - WebSocket sink to send messages to this viewer
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut rejected = false;

        while let Some(notification) = rx.recv().await {
            rejected = matches!(notification, Notification::Rejected(_));

            let json = match serde_json::to_string(&ServerMessage::from(notification)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                return;
            }
        }

        let frame = if rejected {
            CloseFrame {
                code: close_code::AGAIN,
                reason: "too many viewers".into(),
            }
        } else {
            CloseFrame {
                code: close_code::NORMAL,
                reason: "".into(),
            }
        };
        let _ = sender.send(Message::Close(Some(frame))).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this viewer to receive notifications
    let (tx, rx) = mpsc::unbounded_channel();

    let connect_result = state
        .connect_viewer_usecase
        .execute(connection_id, tx)
        .await;

    // Spawn a task to forward notifications to this viewer
    let mut send_task = pusher_loop(rx, sender);

    if let Err(e) = connect_result {
        match e {
            ConnectError::CapacityExceeded { max_clients } => {
                tracing::warn!(
                    "Rejecting viewer '{}': capacity of {} viewers reached",
                    connection_id,
                    max_clients
                );
            }
            ConnectError::ChannelClosed => {
                tracing::warn!("Viewer '{}' went away while connecting", connection_id);
            }
        }
        // The rejected sender is already dropped, so the pusher exits after the close frame
        if tokio::time::timeout(REJECTION_FLUSH_TIMEOUT, &mut send_task)
            .await
            .is_err()
        {
            send_task.abort();
        }
        return;
    }

    tracing::info!("Viewer '{}' connected, sent config and sync", connection_id);

    // Per-connection drift timer, cancelled when this connection ends
    let drift_timer = DriftTimer::start(
        state.extrapolate_drift_usecase.clone(),
        state.drift_tick_interval,
    );

    let state_clone = state.clone();

    // Spawn a task to receive control events from this viewer
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text);

                    let control = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(msg) => msg,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed message from '{}': {}",
                                connection_id,
                                e
                            );
                            continue;
                        }
                    };

                    let ClientMessage::Control {
                        is_playing,
                        current_time,
                    } = control;

                    let targets = state_clone
                        .apply_control_usecase
                        .execute(connection_id, is_playing, current_time)
                        .await;
                    tracing::info!(
                        "Viewer '{}' set playing={} at {:.3}s, synced {} other viewer(s)",
                        connection_id,
                        is_playing,
                        current_time,
                        targets.len()
                    );
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Viewer '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Stop ticking before the viewer is removed
    drift_timer.cancel();

    match state
        .disconnect_viewer_usecase
        .execute(connection_id)
        .await
    {
        Ok(remaining) => {
            tracing::info!(
                "Viewer '{}' disconnected, {} viewer(s) remaining",
                connection_id,
                remaining
            );
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect viewer: {}", e);
        }
    }
}
