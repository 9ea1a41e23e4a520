use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::events::{ConnectionEvent, RoomEvent};

/// Single inbound queue shared by every connection.
///
/// All events funnel into one receiver so they are handled one at a time,
/// in the order they were emitted.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: mpsc::Sender<ConnectionEvent>,
}

impl EventBus {
    /// Creates the bus and the receiving end the worker drains
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ConnectionEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Queue an event from a connection. Waits while the queue is full.
    pub async fn emit(&self, connection_id: &str, event: RoomEvent) {
        let event_type = event.event_type();
        let envelope = ConnectionEvent {
            connection_id: connection_id.to_string(),
            event,
        };

        match self.sender.send(envelope).await {
            Ok(()) => {
                debug!(
                    connection_id = %connection_id,
                    event_type = event_type,
                    "Event queued"
                );
            }
            Err(_) => {
                warn!(
                    connection_id = %connection_id,
                    event_type = event_type,
                    "Event worker is gone, dropping event"
                );
            }
        }
    }
}
