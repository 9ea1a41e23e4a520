use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::room::models::{ChatMessage, RoomSnapshot};

/// Display name used when a client joins without one
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Event names on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    // Client -> Server
    JoinRoom,

    // Both directions
    ChatMessage,
    VideoLoad,
    VideoControl,

    // Server -> Client
    RoomData,
    RoomMembers,
    Error,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub room_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoLoadPayload {
    pub room_id: String,
    pub video_id: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoControlPayload {
    pub room_id: String,
    pub action: String,
    pub current_time: f64,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Create a roomData message carrying the full room snapshot
    pub fn room_data(snapshot: &RoomSnapshot) -> Self {
        Self::new(
            MessageType::RoomData,
            json!({ "video": snapshot.video, "chat": snapshot.chat }),
        )
    }

    /// Create a roomMembers message
    pub fn room_members(members: &[String]) -> Self {
        Self::new(MessageType::RoomMembers, json!(members))
    }

    /// Create a relayed chatMessage
    pub fn chat_message(chat: &ChatMessage) -> Self {
        Self::new(
            MessageType::ChatMessage,
            json!({ "username": chat.username, "message": chat.message }),
        )
    }

    /// Create a relayed videoLoad
    pub fn video_load(video_id: &str, video_url: &str) -> Self {
        Self::new(
            MessageType::VideoLoad,
            json!({ "videoId": video_id, "videoUrl": video_url }),
        )
    }

    /// Create a relayed videoControl; the action goes out exactly as received
    pub fn video_control(room_id: &str, action: &str, current_time: f64) -> Self {
        Self::new(
            MessageType::VideoControl,
            json!({ "roomId": room_id, "action": action, "currentTime": current_time }),
        )
    }

    /// Create an error message
    pub fn error(kind: &str, message: String) -> Self {
        Self::new(MessageType::Error, json!({ "kind": kind, "message": message }))
    }
}
