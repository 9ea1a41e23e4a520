use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    event::RoomEventError,
    membership::MembershipTracker,
    room::repository::RoomRepository,
    session::{JoinTransition, SessionRepository},
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::MessageBroadcaster;

pub struct RoomEventHandlers {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
    membership: Arc<MembershipTracker>,
}

impl RoomEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
        membership: Arc<MembershipTracker>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            connection_manager,
            membership,
        }
    }

    /// joinRoom: make sure the room exists, subscribe the connection, hand it
    /// the full snapshot, then tell the whole room who is here.
    pub async fn handle_join(
        &self,
        connection_id: &str,
        room_id: &str,
        username: &str,
    ) -> Result<(), RoomEventError> {
        // Rejected before anything is touched
        let transition = self
            .session_repository
            .join(connection_id, room_id)
            .await?;

        let room = self.room_repository.get_or_create_room(room_id).await;

        if transition == JoinTransition::Entered {
            self.connection_manager
                .join_room(connection_id, room_id, username)
                .await;
            info!(
                room_id = %room_id,
                connection_id = %connection_id,
                username = %username,
                "Connection joined room"
            );
        } else {
            debug!(
                room_id = %room_id,
                connection_id = %connection_id,
                "Connection rejoined its room, resending snapshot"
            );
        }

        let room_data = WebSocketMessage::room_data(&room.snapshot());
        MessageBroadcaster::send_to_connection(&self.connection_manager, connection_id, &room_data)
            .await?;

        self.membership.broadcast_members(room_id).await?;

        Ok(())
    }
}
