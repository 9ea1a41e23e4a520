use std::sync::Arc;
use tracing::debug;

use crate::{
    event::RoomEventError,
    room::{models::ChatMessage, repository::RoomRepository},
    session::SessionRepository,
    websockets::{
        connection_manager::ConnectionManager,
        messages::{WebSocketMessage, DEFAULT_USERNAME},
    },
};

use super::shared::MessageBroadcaster;

pub struct ChatEventHandlers {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl ChatEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            connection_manager,
        }
    }

    pub async fn handle_chat_message(
        &self,
        connection_id: &str,
        room_id: &str,
        message: &str,
    ) -> Result<(), RoomEventError> {
        self.session_repository
            .require_joined(connection_id, room_id)
            .await?;

        let username = self
            .connection_manager
            .username_of(connection_id)
            .await
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let chat = ChatMessage {
            username,
            message: message.to_string(),
        };
        let history_len = self
            .room_repository
            .append_chat(room_id, chat.clone())
            .await?;

        debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            history_len = history_len,
            "Relaying chat message"
        );

        MessageBroadcaster::broadcast_to_others(
            &self.connection_manager,
            room_id,
            connection_id,
            &WebSocketMessage::chat_message(&chat),
        )
        .await
    }
}
