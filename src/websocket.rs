use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::Response,
};
use axum::extract::ws::WebSocket;
use serde_json::json;
use tracing::{info, error};
use futures_util::{SinkExt, StreamExt};

use crate::state::{AppState, WidgetSession};
use crate::handlers;
use crate::translate::languages::all_languages;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let client_uid = state.generate_client_uid();
    info!("New WebSocket connection: {}", client_uid);

    state.sessions.insert(client_uid.clone(), WidgetSession::default());

    let (mut sender, mut receiver) = socket.split();

    let initial_messages = vec![
        json!({
            "type": "connection-established",
            "client_uid": client_uid
        }),
        json!({
            "type": "languages",
            "languages": all_languages()
        }),
    ];

    for msg in initial_messages {
        if let Err(e) = sender.send(Message::Text(msg.to_string())).await {
            error!("Failed to send initial message: {}", e);
            state.sessions.remove(&client_uid);
            return;
        }
    }

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Err(e) = handlers::handle_message(&state, &client_uid, &text, &mut sender).await {
                    error!("Error handling message: {}", e);
                }
            }
            Ok(Message::Close(_)) => {
                info!("Client {} closed the connection", client_uid);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!("WebSocket error for {}: {}", client_uid, e);
                break;
            }
        }
    }

    state.sessions.remove(&client_uid);
    info!("WebSocket connection closed: {}", client_uid);
}
