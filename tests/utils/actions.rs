use serde_json::json;
use tokio::time::{sleep, Duration};

use watchparty::{
    event::RoomEvent,
    websockets::{MessageHandler, MessageType, WebSocketMessage},
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

#[allow(dead_code)]
impl TestSetup {
    /// Feed a raw text frame through the receive handler and wait for processing
    pub async fn send_raw(&self, connection_id: &str, text: &str) {
        self.input_handler
            .handle_message(connection_id, text.to_string())
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Send a WebSocket message and wait for processing
    pub async fn send_message(&self, connection_id: &str, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(connection_id, &message_json).await;
    }

    /// Emit the disconnect the socket task would emit, and wait for processing
    pub async fn disconnect(&self, connection_id: &str) {
        self.app_state
            .event_bus
            .emit(connection_id, RoomEvent::Disconnected)
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn join(&self, connection_id: &str, room_id: &str, username: &str) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::JoinRoom,
                json!({ "roomId": room_id, "username": username }),
            ),
        )
        .await;
    }

    pub async fn chat(&self, connection_id: &str, room_id: &str, message: &str) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::ChatMessage,
                json!({ "roomId": room_id, "message": message }),
            ),
        )
        .await;
    }

    pub async fn load_video(&self, connection_id: &str, room_id: &str, video_id: &str, video_url: &str) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::VideoLoad,
                json!({ "roomId": room_id, "videoId": video_id, "videoUrl": video_url }),
            ),
        )
        .await;
    }

    pub async fn control_video(&self, connection_id: &str, room_id: &str, action: &str, current_time: f64) {
        self.send_message(
            connection_id,
            WebSocketMessage::new(
                MessageType::VideoControl,
                json!({ "roomId": room_id, "action": action, "currentTime": current_time }),
            ),
        )
        .await;
    }
}
