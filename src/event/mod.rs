// Event-driven architecture components
//
// Sockets turn frames into typed room events and push them onto one queue;
// a single worker pops them and hands each to the router.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::{ConnectionEvent, RoomEvent};
pub use room_handler::{RoomEventError, RoomEventHandler};
pub use worker::EventWorker;

// Internal modules
mod bus;
mod events;
mod room_handler;
mod worker;
