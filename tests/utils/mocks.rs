use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use watchparty::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every frame per connection instead of writing to a socket.
/// Room groups and usernames behave like the real manager.
#[derive(Clone, Default)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    connected: Arc<RwLock<Vec<String>>>,
    usernames: Arc<RwLock<HashMap<String, String>>>,
    rooms: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

#[allow(dead_code)]
impl MockConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_messages_for(&self, connection_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(connection_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pop the oldest unread frame for a connection
    pub async fn consume_message_for(&self, connection_id: &str) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(connection_id)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }

    pub async fn is_connected(&self, connection_id: &str) -> bool {
        self.connected
            .read()
            .await
            .iter()
            .any(|c| c == connection_id)
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.connected.write().await.push(connection_id);
    }

    async fn remove_connection(&self, connection_id: &str) -> Vec<String> {
        self.connected.write().await.retain(|c| c != connection_id);
        self.usernames.write().await.remove(connection_id);

        let mut left = Vec::new();
        let mut rooms = self.rooms.write().await;
        for (room_id, members) in rooms.iter_mut() {
            if members.iter().any(|c| c == connection_id) {
                members.retain(|c| c != connection_id);
                left.push(room_id.clone());
            }
        }
        rooms.retain(|_, members| !members.is_empty());
        left
    }

    async fn join_room(&self, connection_id: &str, room_id: &str, username: &str) {
        self.usernames
            .write()
            .await
            .entry(connection_id.to_string())
            .or_insert_with(|| username.to_string());

        let mut rooms = self.rooms.write().await;
        let members = rooms.entry(room_id.to_string()).or_default();
        if !members.iter().any(|c| c == connection_id) {
            members.push(connection_id.to_string());
        }
    }

    async fn username_of(&self, connection_id: &str) -> Option<String> {
        self.usernames.read().await.get(connection_id).cloned()
    }

    async fn connections_in_room(&self, room_id: &str) -> Vec<String> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) {
        if !self.is_connected(connection_id).await {
            return;
        }
        self.sent_messages
            .write()
            .await
            .entry(connection_id.to_string())
            .or_default()
            .push_back(message.to_string());
    }
}
