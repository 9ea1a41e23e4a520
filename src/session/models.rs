use thiserror::Error;

/// Lifecycle of one connection as far as room events are concerned
///
/// `Connected` -> `Joined` on the first `joinRoom`, `Joined` -> `Disconnected`
/// when the socket goes away. A connection works in exactly one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Joined { room_id: String },
    Disconnected,
}

impl SessionState {
    pub fn room_id(&self) -> Option<&str> {
        match self {
            SessionState::Joined { room_id } => Some(room_id),
            _ => None,
        }
    }

    /// Transition for a `joinRoom` request
    pub fn join(&self, room_id: &str) -> Result<JoinTransition, SessionError> {
        match self {
            SessionState::Connected => Ok(JoinTransition::Entered),
            SessionState::Joined { room_id: current } if current == room_id => {
                Ok(JoinTransition::AlreadyInRoom)
            }
            SessionState::Joined { room_id: current } => Err(SessionError::AlreadyJoined {
                current: current.clone(),
                requested: room_id.to_string(),
            }),
            SessionState::Disconnected => Err(SessionError::Disconnected),
        }
    }

    /// Precondition for every state-changing event on `room_id`
    pub fn require_joined(&self, room_id: &str) -> Result<(), SessionError> {
        match self {
            SessionState::Joined { room_id: current } if current == room_id => Ok(()),
            SessionState::Joined { .. } => Err(SessionError::NotInRoom(room_id.to_string())),
            SessionState::Connected => Err(SessionError::NotJoined),
            SessionState::Disconnected => Err(SessionError::Disconnected),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinTransition {
    /// First join for this connection
    Entered,
    /// The connection asked to join the room it is already in
    AlreadyInRoom,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Connection has not joined a room")]
    NotJoined,

    #[error("Connection never joined room {0}")]
    NotInRoom(String),

    #[error("Connection already joined room {current}, cannot join {requested}")]
    AlreadyJoined { current: String, requested: String },

    #[error("Connection is disconnected")]
    Disconnected,
}
