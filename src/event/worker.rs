use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::{events::ConnectionEvent, room_handler::RoomEventHandler};
use crate::websockets::{ConnectionManager, WebSocketMessage};

/// The single logical worker: drains the event queue and runs the handler
/// for one event at a time.
///
/// A handler error is turned into an `error` event for the originating
/// connection; nobody else hears about it and the worker keeps going.
pub struct EventWorker {
    receiver: mpsc::Receiver<ConnectionEvent>,
    handler: Arc<dyn RoomEventHandler>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl EventWorker {
    pub fn new(
        receiver: mpsc::Receiver<ConnectionEvent>,
        handler: Arc<dyn RoomEventHandler>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            receiver,
            handler,
            connection_manager,
        }
    }

    /// Spawn the worker task; it ends once every `EventBus` clone is dropped
    pub fn start(self) -> JoinHandle<()> {
        let handler_name = self.handler.handler_name();
        info!(handler = handler_name, "Starting event worker");

        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let handler_name = self.handler.handler_name();

        while let Some(ConnectionEvent {
            connection_id,
            event,
        }) = self.receiver.recv().await
        {
            let event_type = event.event_type();
            let room_id = event.room_id().map(str::to_string);

            if let Err(e) = self.handler.handle_room_event(&connection_id, event).await {
                warn!(
                    connection_id = %connection_id,
                    handler = handler_name,
                    event_type = event_type,
                    room_id = ?room_id,
                    kind = e.kind(),
                    error = %e,
                    "Room event rejected"
                );

                let message = WebSocketMessage::error(e.kind(), e.to_string());
                match serde_json::to_string(&message) {
                    Ok(json) => {
                        self.connection_manager
                            .send_to_connection(&connection_id, &json)
                            .await
                    }
                    Err(e) => error!(error = %e, "Failed to serialize error message"),
                }
            }
        }

        info!(handler = handler_name, "Event worker stopped - queue closed");
    }
}
