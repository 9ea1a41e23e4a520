use crate::{
    event::RoomEventError,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};
use std::sync::Arc;

pub struct MessageBroadcaster;

impl MessageBroadcaster {
    fn to_json(message: &WebSocketMessage) -> Result<String, RoomEventError> {
        serde_json::to_string(message).map_err(|e| {
            RoomEventError::HandlerError(format!("Failed to serialize message: {}", e))
        })
    }

    pub async fn send_to_connection(
        connection_manager: &Arc<dyn ConnectionManager>,
        connection_id: &str,
        message: &WebSocketMessage,
    ) -> Result<(), RoomEventError> {
        let message_json = Self::to_json(message)?;
        connection_manager
            .send_to_connection(connection_id, &message_json)
            .await;
        Ok(())
    }

    /// Everyone in the room except the connection that caused the change
    pub async fn broadcast_to_others(
        connection_manager: &Arc<dyn ConnectionManager>,
        room_id: &str,
        sender_id: &str,
        message: &WebSocketMessage,
    ) -> Result<(), RoomEventError> {
        let message_json = Self::to_json(message)?;
        connection_manager
            .send_to_room_except(room_id, sender_id, &message_json)
            .await;
        Ok(())
    }
}
