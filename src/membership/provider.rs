use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::websockets::ConnectionManager;

/// Source of the live display names in a room
///
/// The router only needs names, so it never has to know how the
/// connection layer tracks groups.
#[async_trait]
pub trait MembershipProvider: Send + Sync {
    /// Display names of every connection currently in the room
    async fn members_of(&self, room_id: &str) -> Vec<String>;

    /// Number of live connections in the room, named or not
    async fn connection_count(&self, room_id: &str) -> usize;
}

/// Membership read straight from the connection layer
pub struct ConnectionMembership {
    connection_manager: Arc<dyn ConnectionManager>,
}

impl ConnectionMembership {
    pub fn new(connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self { connection_manager }
    }
}

#[async_trait]
impl MembershipProvider for ConnectionMembership {
    async fn members_of(&self, room_id: &str) -> Vec<String> {
        let mut members = Vec::new();
        for connection_id in self.connection_manager.connections_in_room(room_id).await {
            // Connections without a name are skipped
            if let Some(name) = self.connection_manager.username_of(&connection_id).await {
                members.push(name);
            }
        }

        debug!(room_id = %room_id, members = ?members, "Resolved room members");
        members
    }

    async fn connection_count(&self, room_id: &str) -> usize {
        self.connection_manager
            .connections_in_room(room_id)
            .await
            .len()
    }
}
