use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::event::{EventBus, RoomEvent, RoomEventError};
use crate::room::types::VideoAction;
use crate::shared::AppState;
use crate::websockets::connection_manager::ConnectionManager;
use crate::websockets::messages::{
    ChatMessagePayload, JoinRoomPayload, MessageType, VideoControlPayload, VideoLoadPayload,
    WebSocketMessage, DEFAULT_USERNAME,
};

use super::socket::{Connection, MessageHandler};

/// Turn one raw text frame into a typed room event.
///
/// Everything the router receives has passed through here, so the router
/// never sees a missing field or a server-only event type.
pub fn parse_client_message(text: &str) -> Result<RoomEvent, RoomEventError> {
    let message: WebSocketMessage = serde_json::from_str(text)
        .map_err(|e| RoomEventError::InvalidPayload(format!("Malformed message: {}", e)))?;

    match message.message_type {
        MessageType::JoinRoom => {
            let payload: JoinRoomPayload = parse_payload(message.payload)?;
            let username = payload
                .username
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
            Ok(RoomEvent::JoinRequested {
                room_id: payload.room_id,
                username,
            })
        }
        MessageType::ChatMessage => {
            let payload: ChatMessagePayload = parse_payload(message.payload)?;
            Ok(RoomEvent::ChatMessage {
                room_id: payload.room_id,
                message: payload.message,
            })
        }
        MessageType::VideoLoad => {
            let payload: VideoLoadPayload = parse_payload(message.payload)?;
            Ok(RoomEvent::VideoLoad {
                room_id: payload.room_id,
                video_id: payload.video_id,
                video_url: payload.video_url,
            })
        }
        MessageType::VideoControl => {
            let payload: VideoControlPayload = parse_payload(message.payload)?;
            if !payload.current_time.is_finite() || payload.current_time < 0.0 {
                return Err(RoomEventError::InvalidPayload(format!(
                    "currentTime must be a non-negative number, got {}",
                    payload.current_time
                )));
            }
            Ok(RoomEvent::VideoControl {
                room_id: payload.room_id,
                action: VideoAction::parse(&payload.action),
                current_time: payload.current_time,
            })
        }
        other => Err(RoomEventError::InvalidPayload(format!(
            "{:?} is not accepted from clients",
            other
        ))),
    }
}

fn parse_payload<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, RoomEventError> {
    serde_json::from_value(payload)
        .map_err(|e| RoomEventError::InvalidPayload(format!("Invalid payload: {}", e)))
}

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    event_bus: EventBus,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl WebsocketReceiveHandler {
    pub fn new(event_bus: EventBus, connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self {
            event_bus,
            connection_manager,
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        match parse_client_message(&message) {
            Ok(event) => self.event_bus.emit(connection_id, event).await,
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                let reply = WebSocketMessage::error(e.kind(), e.to_string());
                if let Ok(reply_json) = serde_json::to_string(&reply) {
                    self.connection_manager
                        .send_to_connection(connection_id, &reply_json)
                        .await;
                }
            }
        }
    }
}

/// WebSocket endpoint
/// GET /ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(connection_id.clone(), outbound_sender)
        .await;
    app_state.session_repository.connect(&connection_id).await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(
        app_state.event_bus.clone(),
        Arc::clone(&app_state.connection_manager),
    ));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Queued behind this connection's earlier events; the router does the cleanup
    app_state
        .event_bus
        .emit(&connection_id, RoomEvent::Disconnected)
        .await;
}
