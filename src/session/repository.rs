use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::{JoinTransition, SessionError, SessionState};

/// Per-connection state machine storage
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a fresh connection in the `Connected` state
    async fn connect(&self, connection_id: &str);

    /// Current state; unknown connections count as `Connected`
    async fn state(&self, connection_id: &str) -> SessionState;

    /// Apply a `joinRoom` transition
    async fn join(&self, connection_id: &str, room_id: &str)
        -> Result<JoinTransition, SessionError>;

    async fn require_joined(&self, connection_id: &str, room_id: &str)
        -> Result<(), SessionError>;

    /// Drop the connection, returning the room it had joined
    async fn disconnect(&self, connection_id: &str) -> Option<String>;
}

pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionState>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn connect(&self, connection_id: &str) {
        self.sessions
            .write()
            .await
            .insert(connection_id.to_string(), SessionState::Connected);
        debug!(connection_id = %connection_id, "Session registered");
    }

    async fn state(&self, connection_id: &str) -> SessionState {
        self.sessions
            .read()
            .await
            .get(connection_id)
            .cloned()
            .unwrap_or(SessionState::Connected)
    }

    async fn join(
        &self,
        connection_id: &str,
        room_id: &str,
    ) -> Result<JoinTransition, SessionError> {
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .entry(connection_id.to_string())
            .or_insert(SessionState::Connected);

        let transition = state.join(room_id)?;
        if transition == JoinTransition::Entered {
            *state = SessionState::Joined {
                room_id: room_id.to_string(),
            };
            info!(connection_id = %connection_id, room_id = %room_id, "Session joined room");
        }
        Ok(transition)
    }

    async fn require_joined(
        &self,
        connection_id: &str,
        room_id: &str,
    ) -> Result<(), SessionError> {
        self.state(connection_id).await.require_joined(room_id)
    }

    async fn disconnect(&self, connection_id: &str) -> Option<String> {
        let previous = self.sessions.write().await.remove(connection_id)?;
        debug!(connection_id = %connection_id, previous = ?previous, "Session closed");
        previous.room_id().map(str::to_string)
    }
}
