// Library crate for the watch party server
// This file exposes the public API for integration tests

pub mod config;
pub mod event;
pub mod membership;
pub mod room;
pub mod session;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use event::{EventBus, EventWorker, RoomEvent, RoomEventError};
pub use membership::MembershipTracker;
pub use room::{models::RoomModel, repository::RoomRepository};
pub use shared::{build_app, AppError, AppState};
pub use websockets::{
    ConnectionManager, EventRouter, MessageHandler, MessageType, WebSocketMessage,
    WebsocketReceiveHandler,
};
