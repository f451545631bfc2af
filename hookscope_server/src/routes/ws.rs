//! WebSocket feed of live captures

use super::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use hookscope_core::RequestFilter;

/// WebSocket handler for live updates
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Handle a WebSocket connection: send the current request batch, then
/// forward inspector events as they happen.
async fn handle_websocket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Initial batch of captured requests
    if let Ok(requests) = state.inspector.list_requests(&RequestFilter::default()).await {
        let initial_msg = serde_json::json!({
            "type": "requests",
            "data": requests
        });
        if let Ok(json) = serde_json::to_string(&initial_msg) {
            let _ = sender.send(Message::Text(json.into())).await;
        }
    }

    // Subscribe to new events
    let mut event_rx = state.inspector.subscribe();

    // Forward events to the socket
    let send_task = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            if let Ok(json) = serde_json::to_string(&event) {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Drain incoming messages until the client goes away
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }

    send_task.abort();
}
