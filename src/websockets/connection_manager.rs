use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Connection layer: live sockets, their display names, and room groups.
///
/// Room groups keep insertion order so member listings are stable.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>);

    /// Drop the connection and every group it was in, returning those room ids
    async fn remove_connection(&self, connection_id: &str) -> Vec<String>;

    /// Subscribe to a room group. The first username given sticks for the
    /// lifetime of the connection.
    async fn join_room(&self, connection_id: &str, room_id: &str, username: &str);

    async fn username_of(&self, connection_id: &str) -> Option<String>;

    async fn connections_in_room(&self, room_id: &str) -> Vec<String>;

    async fn send_to_connection(&self, connection_id: &str, message: &str);

    async fn send_to_room(&self, room_id: &str, message: &str) {
        for connection_id in self.connections_in_room(room_id).await {
            self.send_to_connection(&connection_id, message).await;
        }
    }

    async fn send_to_room_except(&self, room_id: &str, except: &str, message: &str) {
        for connection_id in self.connections_in_room(room_id).await {
            if connection_id != except {
                self.send_to_connection(&connection_id, message).await;
            }
        }
    }
}

struct ConnectionEntry {
    sender: mpsc::UnboundedSender<String>,
    username: Option<String>,
    rooms: Vec<String>,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<String, ConnectionEntry>,
    // room_id -> connection ids in join order
    rooms: HashMap<String, Vec<String>>,
}

pub struct InMemoryConnectionManager {
    registry: RwLock<Registry>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
        }
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut registry = self.registry.write().await;
        registry.connections.insert(
            connection_id,
            ConnectionEntry {
                sender,
                username: None,
                rooms: Vec::new(),
            },
        );
    }

    async fn remove_connection(&self, connection_id: &str) -> Vec<String> {
        let mut registry = self.registry.write().await;
        let Some(entry) = registry.connections.remove(connection_id) else {
            return Vec::new();
        };

        for room_id in &entry.rooms {
            if let Some(members) = registry.rooms.get_mut(room_id) {
                members.retain(|id| id != connection_id);
                if members.is_empty() {
                    registry.rooms.remove(room_id);
                }
            }
        }

        debug!(
            connection_id = %connection_id,
            rooms = ?entry.rooms,
            "Connection removed"
        );
        entry.rooms
    }

    async fn join_room(&self, connection_id: &str, room_id: &str, username: &str) {
        let mut registry = self.registry.write().await;
        let Some(entry) = registry.connections.get_mut(connection_id) else {
            debug!(connection_id = %connection_id, "Join for unknown connection ignored");
            return;
        };

        if entry.username.is_none() {
            entry.username = Some(username.to_string());
        }
        if entry.rooms.iter().any(|r| r == room_id) {
            return;
        }
        entry.rooms.push(room_id.to_string());

        registry
            .rooms
            .entry(room_id.to_string())
            .or_default()
            .push(connection_id.to_string());
    }

    async fn username_of(&self, connection_id: &str) -> Option<String> {
        let registry = self.registry.read().await;
        registry
            .connections
            .get(connection_id)
            .and_then(|entry| entry.username.clone())
    }

    async fn connections_in_room(&self, room_id: &str) -> Vec<String> {
        let registry = self.registry.read().await;
        registry.rooms.get(room_id).cloned().unwrap_or_default()
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) {
        let registry = self.registry.read().await;
        if let Some(entry) = registry.connections.get(connection_id) {
            let _ = entry.sender.send(message.to_string());
        }
    }
}
