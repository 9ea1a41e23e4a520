use std::sync::Arc;
use tracing::info;

use super::provider::MembershipProvider;
use crate::event::RoomEventError;
use crate::websockets::{ConnectionManager, WebSocketMessage};

/// Recomputes a room's member list and pushes it to everyone in the room
pub struct MembershipTracker {
    provider: Arc<dyn MembershipProvider>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl MembershipTracker {
    pub fn new(
        provider: Arc<dyn MembershipProvider>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            provider,
            connection_manager,
        }
    }

    pub async fn members_of(&self, room_id: &str) -> Vec<String> {
        self.provider.members_of(room_id).await
    }

    pub async fn connection_count(&self, room_id: &str) -> usize {
        self.provider.connection_count(room_id).await
    }

    /// Send `roomMembers` to the whole room, triggering connection included.
    ///
    /// The list is computed once and the same frame goes to every recipient.
    pub async fn broadcast_members(&self, room_id: &str) -> Result<Vec<String>, RoomEventError> {
        let members = self.provider.members_of(room_id).await;
        let message = WebSocketMessage::room_members(&members);
        let message_json = serde_json::to_string(&message).map_err(|e| {
            RoomEventError::HandlerError(format!("Failed to serialize message: {}", e))
        })?;

        self.connection_manager
            .send_to_room(room_id, &message_json)
            .await;

        info!(
            room_id = %room_id,
            member_count = members.len(),
            "Broadcast room members"
        );
        Ok(members)
    }
}
