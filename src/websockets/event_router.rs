use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::{RoomEvent, RoomEventError, RoomEventHandler},
    membership::MembershipTracker,
    room::{repository::RoomRepository, types::UnknownActionPolicy},
    session::SessionRepository,
    websockets::connection_manager::ConnectionManager,
};

use super::event_handlers::{
    ChatEventHandlers, ConnectionEventHandlers, RoomEventHandlers, VideoEventHandlers,
};

/// Routes inbound room events to the specialized handlers:
/// - RoomEventHandlers: joinRoom
/// - ChatEventHandlers: chatMessage
/// - VideoEventHandlers: videoLoad, videoControl
/// - ConnectionEventHandlers: disconnect
pub struct EventRouter {
    room_handlers: RoomEventHandlers,
    chat_handlers: ChatEventHandlers,
    video_handlers: VideoEventHandlers,
    connection_handlers: ConnectionEventHandlers,
}

#[async_trait]
impl RoomEventHandler for EventRouter {
    async fn handle_room_event(
        &self,
        connection_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        debug!(
            connection_id = %connection_id,
            event = ?event,
            "Routing room event"
        );

        match event {
            RoomEvent::JoinRequested { room_id, username } => {
                self.room_handlers
                    .handle_join(connection_id, &room_id, &username)
                    .await
            }
            RoomEvent::ChatMessage { room_id, message } => {
                self.chat_handlers
                    .handle_chat_message(connection_id, &room_id, &message)
                    .await
            }
            RoomEvent::VideoLoad {
                room_id,
                video_id,
                video_url,
            } => {
                self.video_handlers
                    .handle_video_load(connection_id, &room_id, &video_id, &video_url)
                    .await
            }
            RoomEvent::VideoControl {
                room_id,
                action,
                current_time,
            } => {
                self.video_handlers
                    .handle_video_control(connection_id, &room_id, &action, current_time)
                    .await
            }
            RoomEvent::Disconnected => {
                self.connection_handlers
                    .handle_disconnect(connection_id)
                    .await
            }
        }
    }

    fn handler_name(&self) -> &'static str {
        "EventRouter"
    }
}

impl EventRouter {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
        membership: Arc<MembershipTracker>,
        unknown_action_policy: UnknownActionPolicy,
    ) -> Self {
        let room_handlers = RoomEventHandlers::new(
            Arc::clone(&room_repository),
            Arc::clone(&session_repository),
            Arc::clone(&connection_manager),
            Arc::clone(&membership),
        );

        let chat_handlers = ChatEventHandlers::new(
            Arc::clone(&room_repository),
            Arc::clone(&session_repository),
            Arc::clone(&connection_manager),
        );

        let video_handlers = VideoEventHandlers::new(
            Arc::clone(&room_repository),
            Arc::clone(&session_repository),
            Arc::clone(&connection_manager),
            unknown_action_policy,
        );

        let connection_handlers = ConnectionEventHandlers::new(
            room_repository,
            session_repository,
            connection_manager,
            membership,
        );

        Self {
            room_handlers,
            chat_handlers,
            video_handlers,
            connection_handlers,
        }
    }
}
