// Public API - what other modules can use
pub use models::{JoinTransition, SessionError, SessionState};
pub use repository::{InMemorySessionRepository, SessionRepository};

// Internal modules
pub mod models;
pub mod repository;
