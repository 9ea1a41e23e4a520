use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::models::{ChatMessage, RoomModel, VideoState};
use super::types::VideoAction;
use crate::config::DEFAULT_CHAT_HISTORY_LIMIT;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),
}

/// Trait for room store operations
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Returns the room, creating an empty one on first reference
    async fn get_or_create_room(&self, room_id: &str) -> RoomModel;

    async fn get_room(&self, room_id: &str) -> Option<RoomModel>;

    async fn list_rooms(&self) -> Vec<RoomModel>;

    /// Replace the video, starting paused at zero
    async fn apply_video_load(
        &self,
        room_id: &str,
        video_id: &str,
        video_url: &str,
    ) -> Result<VideoState, RoomError>;

    async fn apply_video_control(
        &self,
        room_id: &str,
        action: &VideoAction,
        current_time: f64,
    ) -> Result<VideoState, RoomError>;

    /// Append to the chat feed, returning the new history length
    async fn append_chat(&self, room_id: &str, message: ChatMessage) -> Result<usize, RoomError>;

    /// Returns true when a room was actually removed
    async fn delete_room(&self, room_id: &str) -> bool;
}

/// In-memory room store, lives for the lifetime of the server
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<String, RoomModel>>,
    chat_capacity: usize,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_HISTORY_LIMIT)
    }
}

impl InMemoryRoomRepository {
    /// Creates an empty store whose rooms keep at most `chat_capacity` chat lines
    pub fn new(chat_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            chat_capacity,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn get_or_create_room(&self, room_id: &str) -> RoomModel {
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room_id = %room_id, "Creating room");
            RoomModel::new(room_id.to_string(), self.chat_capacity)
        });
        room.clone()
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Option<RoomModel> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(room_id).cloned();
        if room.is_none() {
            debug!(room_id = %room_id, "Room not found in memory");
        }
        room
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Vec<RoomModel> {
        let rooms = self.rooms.read().await;
        let mut list: Vec<RoomModel> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    #[instrument(skip(self))]
    async fn apply_video_load(
        &self,
        room_id: &str,
        video_id: &str,
        video_url: &str,
    ) -> Result<VideoState, RoomError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))?;

        room.video.load(video_id.to_string(), video_url.to_string());
        debug!(room_id = %room_id, video_id = %video_id, "Video loaded");

        Ok(room.video.clone())
    }

    #[instrument(skip(self))]
    async fn apply_video_control(
        &self,
        room_id: &str,
        action: &VideoAction,
        current_time: f64,
    ) -> Result<VideoState, RoomError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))?;

        let changed = room.video.apply_control(action, current_time);
        debug!(
            room_id = %room_id,
            action = %action,
            current_time = current_time,
            changed = changed,
            "Video control applied"
        );

        Ok(room.video.clone())
    }

    #[instrument(skip(self, message))]
    async fn append_chat(&self, room_id: &str, message: ChatMessage) -> Result<usize, RoomError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))?;

        room.chat.push(message);
        Ok(room.chat.len())
    }

    #[instrument(skip(self))]
    async fn delete_room(&self, room_id: &str) -> bool {
        let removed = self.rooms.write().await.remove(room_id).is_some();
        if removed {
            info!(room_id = %room_id, "Room deleted");
        }
        removed
    }
}
