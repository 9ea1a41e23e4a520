use async_trait::async_trait;
use thiserror::Error;

use super::events::RoomEvent;
use crate::room::repository::RoomError;
use crate::session::SessionError;

/// Errors that can occur when handling room events
///
/// Every variant is local to the event that raised it and is reported back
/// to the originating connection only.
#[derive(Debug, Error)]
pub enum RoomEventError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid video action: {0}")]
    InvalidAction(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Handler error: {0}")]
    HandlerError(String),
}

impl RoomEventError {
    /// Failure kind as it appears in the `error` event sent to the client
    pub fn kind(&self) -> &'static str {
        match self {
            RoomEventError::Room(RoomError::RoomNotFound(_)) => "RoomNotFound",
            RoomEventError::Session(SessionError::NotInRoom(_)) => "RoomNotFound",
            RoomEventError::Session(SessionError::NotJoined) => "NotJoined",
            RoomEventError::Session(SessionError::Disconnected) => "NotJoined",
            RoomEventError::Session(SessionError::AlreadyJoined { .. }) => "AlreadyJoined",
            RoomEventError::InvalidAction(_) => "InvalidAction",
            RoomEventError::InvalidPayload(_) => "InvalidPayload",
            RoomEventError::HandlerError(_) => "Internal",
        }
    }
}

/// Trait for components that can handle room events
///
/// This provides a clean interface for reacting to inbound events
/// without being tied to WebSocket or connection specifics.
#[async_trait]
pub trait RoomEventHandler: Send + Sync {
    /// Handle one event from one connection
    async fn handle_room_event(
        &self,
        connection_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let cases: Vec<(RoomEventError, &str)> = vec![
            (RoomError::RoomNotFound("r".into()).into(), "RoomNotFound"),
            (SessionError::NotInRoom("r".into()).into(), "RoomNotFound"),
            (SessionError::NotJoined.into(), "NotJoined"),
            (
                SessionError::AlreadyJoined {
                    current: "a".into(),
                    requested: "b".into(),
                }
                .into(),
                "AlreadyJoined",
            ),
            (RoomEventError::InvalidAction("x".into()), "InvalidAction"),
            (RoomEventError::InvalidPayload("x".into()), "InvalidPayload"),
            (RoomEventError::HandlerError("x".into()), "Internal"),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{}", error);
        }
    }
}
