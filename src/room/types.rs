use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::models::RoomModel;

/// Playback control carried by a `videoControl` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoAction {
    Play,
    Pause,
    Seek,
    /// Anything else a client sends; kept verbatim so it can be relayed
    Unknown(String),
}

impl VideoAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "play" => VideoAction::Play,
            "pause" => VideoAction::Pause,
            "seek" => VideoAction::Seek,
            other => VideoAction::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VideoAction::Play => "play",
            VideoAction::Pause => "pause",
            VideoAction::Seek => "seek",
            VideoAction::Unknown(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VideoAction::Unknown(_))
    }
}

impl fmt::Display for VideoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a `videoControl` whose action is not play/pause/seek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownActionPolicy {
    /// Leave the state alone but still relay the event to the room
    #[default]
    Relay,
    /// Answer the sender with an InvalidAction error and relay nothing
    Reject,
}

impl FromStr for UnknownActionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relay" => Ok(UnknownActionPolicy::Relay),
            "reject" => Ok(UnknownActionPolicy::Reject),
            other => Err(format!("expected 'relay' or 'reject', got '{}'", other)),
        }
    }
}

/// Response body for the room inspection endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: String,
    pub member_count: usize,
    pub video_id: String,
    pub chat_length: usize,
}

impl RoomSummary {
    pub fn from_room(room: &RoomModel, member_count: usize) -> Self {
        Self {
            room_id: room.id.clone(),
            member_count,
            video_id: room.video.video_id.clone(),
            chat_length: room.chat.len(),
        }
    }
}
