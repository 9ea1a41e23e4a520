// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use event_router::EventRouter;
pub use handler::{parse_client_message, websocket_handler, WebsocketReceiveHandler};
pub use messages::{MessageType, WebSocketMessage, DEFAULT_USERNAME};
pub use socket::MessageHandler;

// Internal modules
mod connection_manager;
pub mod event_handlers;
mod event_router;
mod handler;
mod messages;
mod socket;
