use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::VideoAction;

/// Playback state shared by every member of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoState {
    pub video_id: String,    // "" when nothing is loaded
    pub video_url: String,
    pub current_time: f64,   // seconds
    pub is_playing: bool,
}

impl Default for VideoState {
    fn default() -> Self {
        Self {
            video_id: String::new(),
            video_url: String::new(),
            current_time: 0.0,
            is_playing: false,
        }
    }
}

impl VideoState {
    /// Loading a video always starts it paused at zero
    pub fn load(&mut self, video_id: String, video_url: String) {
        *self = Self {
            video_id,
            video_url,
            current_time: 0.0,
            is_playing: false,
        };
    }

    /// Apply a control action. Returns false when the action left the state untouched.
    pub fn apply_control(&mut self, action: &VideoAction, current_time: f64) -> bool {
        match action {
            VideoAction::Play => {
                self.is_playing = true;
                self.current_time = current_time;
            }
            VideoAction::Pause => {
                self.is_playing = false;
                self.current_time = current_time;
            }
            VideoAction::Seek => {
                self.current_time = current_time;
            }
            VideoAction::Unknown(_) => return false,
        }
        true
    }
}

/// A single chat line as stored and relayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
}

/// Append-only chat buffer that drops the oldest line once full
#[derive(Debug, Clone, PartialEq)]
pub struct ChatHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages in arrival order, oldest first
    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }
}

/// In-memory room: one video state plus its chat feed
#[derive(Debug, Clone, PartialEq)]
pub struct RoomModel {
    pub id: String,
    pub video: VideoState,
    pub chat: ChatHistory,
}

impl RoomModel {
    pub fn new(id: String, chat_capacity: usize) -> Self {
        Self {
            id,
            video: VideoState::default(),
            chat: ChatHistory::with_capacity(chat_capacity),
        }
    }

    /// Snapshot sent to a joining connection
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            video: self.video.clone(),
            chat: self.chat.to_vec(),
        }
    }
}

/// Full room state as seen by a newly joined connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub video: VideoState,
    pub chat: Vec<ChatMessage>,
}
