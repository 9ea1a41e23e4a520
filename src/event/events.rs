use crate::room::types::VideoAction;

/// Inbound events, already validated at the socket boundary
///
/// Each variant is something one connection asked for; the router decides
/// what it means for the room and who hears about it.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// A connection wants to enter a room
    JoinRequested { room_id: String, username: String },

    /// A chat line for the room feed
    ChatMessage { room_id: String, message: String },

    /// A new video was picked
    VideoLoad {
        room_id: String,
        video_id: String,
        video_url: String,
    },

    /// Play, pause, seek, or anything a newer client might send
    VideoControl {
        room_id: String,
        action: VideoAction,
        current_time: f64,
    },

    /// The socket went away; raised by the connection layer
    Disconnected,
}

impl RoomEvent {
    /// Room the event targets, if it names one
    pub fn room_id(&self) -> Option<&str> {
        match self {
            RoomEvent::JoinRequested { room_id, .. }
            | RoomEvent::ChatMessage { room_id, .. }
            | RoomEvent::VideoLoad { room_id, .. }
            | RoomEvent::VideoControl { room_id, .. } => Some(room_id),
            RoomEvent::Disconnected => None,
        }
    }

    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::JoinRequested { .. } => "join_room",
            RoomEvent::ChatMessage { .. } => "chat_message",
            RoomEvent::VideoLoad { .. } => "video_load",
            RoomEvent::VideoControl { .. } => "video_control",
            RoomEvent::Disconnected => "disconnect",
        }
    }
}

/// An inbound event tagged with the connection that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionEvent {
    pub connection_id: String,
    pub event: RoomEvent,
}
