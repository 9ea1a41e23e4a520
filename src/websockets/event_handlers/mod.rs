pub mod chat_events;
pub mod connection_events;
pub mod room_events;
pub mod shared;
pub mod video_events;

pub use chat_events::ChatEventHandlers;
pub use connection_events::ConnectionEventHandlers;
pub use room_events::RoomEventHandlers;
pub use video_events::VideoEventHandlers;
