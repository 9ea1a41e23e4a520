use std::sync::Arc;
use tracing::info;

use crate::{
    event::RoomEventError,
    membership::MembershipTracker,
    room::repository::RoomRepository,
    session::SessionRepository,
    websockets::connection_manager::ConnectionManager,
};

pub struct ConnectionEventHandlers {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
    membership: Arc<MembershipTracker>,
}

impl ConnectionEventHandlers {
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

    /// Drop the connection, then refresh membership for every room it was in.
    /// A room left with no connections at all is evicted from the store.
    pub async fn handle_disconnect(&self, connection_id: &str) -> Result<(), RoomEventError> {
        let joined_room = self.session_repository.disconnect(connection_id).await;
        let mut rooms = self
            .connection_manager
            .remove_connection(connection_id)
            .await;
        if let Some(room_id) = joined_room {
            if !rooms.contains(&room_id) {
                rooms.push(room_id);
            }
        }

        info!(
            connection_id = %connection_id,
            rooms = ?rooms,
            "Processing disconnect"
        );

        for room_id in &rooms {
            if self.membership.connection_count(room_id).await == 0 {
                self.room_repository.delete_room(room_id).await;
                info!(room_id = %room_id, "Last connection left, room evicted");
            } else {
                self.membership.broadcast_members(room_id).await?;
            }
        }

        Ok(())
    }
}
