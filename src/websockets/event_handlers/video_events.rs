use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    event::RoomEventError,
    room::{
        repository::RoomRepository,
        types::{UnknownActionPolicy, VideoAction},
    },
    session::SessionRepository,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::MessageBroadcaster;

pub struct VideoEventHandlers {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
    unknown_action_policy: UnknownActionPolicy,
}

impl VideoEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
        unknown_action_policy: UnknownActionPolicy,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            connection_manager,
            unknown_action_policy,
        }
    }

    pub async fn handle_video_load(
        &self,
        connection_id: &str,
        room_id: &str,
        video_id: &str,
        video_url: &str,
    ) -> Result<(), RoomEventError> {
        self.session_repository
            .require_joined(connection_id, room_id)
            .await?;

        self.room_repository
            .apply_video_load(room_id, video_id, video_url)
            .await?;

        debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            video_id = %video_id,
            "Relaying video load"
        );

        MessageBroadcaster::broadcast_to_others(
            &self.connection_manager,
            room_id,
            connection_id,
            &WebSocketMessage::video_load(video_id, video_url),
        )
        .await
    }

    pub async fn handle_video_control(
        &self,
        connection_id: &str,
        room_id: &str,
        action: &VideoAction,
        current_time: f64,
    ) -> Result<(), RoomEventError> {
        self.session_repository
            .require_joined(connection_id, room_id)
            .await?;

        if !action.is_known() {
            match self.unknown_action_policy {
                UnknownActionPolicy::Reject => {
                    return Err(RoomEventError::InvalidAction(action.to_string()));
                }
                UnknownActionPolicy::Relay => {
                    warn!(
                        room_id = %room_id,
                        connection_id = %connection_id,
                        action = %action,
                        "Unknown video action, relaying without state change"
                    );
                }
            }
        }

        self.room_repository
            .apply_video_control(room_id, action, current_time)
            .await?;

        debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            action = %action,
            current_time = current_time,
            "Relaying video control"
        );

        MessageBroadcaster::broadcast_to_others(
            &self.connection_manager,
            room_id,
            connection_id,
            &WebSocketMessage::video_control(room_id, action.as_str(), current_time),
        )
        .await
    }
}
