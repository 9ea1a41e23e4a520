use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::event::{EventBus, EventWorker};
use crate::membership::{ConnectionMembership, MembershipTracker};
use crate::room::repository::{InMemoryRoomRepository, RoomRepository};
use crate::session::{InMemorySessionRepository, SessionRepository};
use crate::websockets::{websocket_handler, ConnectionManager, EventRouter, InMemoryConnectionManager};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository>,
    pub session_repository: Arc<dyn SessionRepository>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub membership: Arc<MembershipTracker>,
    pub event_bus: EventBus,
}

impl AppState {
    /// Wire every component for a server run. The returned worker must be
    /// started for any room event to be processed.
    pub fn from_config(config: &ServerConfig) -> (Self, EventWorker) {
        let room_repository: Arc<dyn RoomRepository> =
            Arc::new(InMemoryRoomRepository::new(config.chat_history_limit));
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(InMemorySessionRepository::new());
        let connection_manager: Arc<dyn ConnectionManager> =
            Arc::new(InMemoryConnectionManager::new());

        Self::with_components(
            room_repository,
            session_repository,
            connection_manager,
            config,
        )
    }

    pub fn with_components(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
        config: &ServerConfig,
    ) -> (Self, EventWorker) {
        let membership = Arc::new(MembershipTracker::new(
            Arc::new(ConnectionMembership::new(Arc::clone(&connection_manager))),
            Arc::clone(&connection_manager),
        ));

        let router = Arc::new(EventRouter::new(
            Arc::clone(&room_repository),
            Arc::clone(&session_repository),
            Arc::clone(&connection_manager),
            Arc::clone(&membership),
            config.unknown_action_policy,
        ));

        let (event_bus, receiver) = EventBus::new(config.event_queue_capacity);
        let worker = EventWorker::new(receiver, router, Arc::clone(&connection_manager));

        let state = Self {
            room_repository,
            session_repository,
            connection_manager,
            membership,
            event_bus,
        };
        (state, worker)
    }
}

/// HTTP surface: WebSocket upgrade, health check and room inspection
pub fn build_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Watch party server" }))
        .route("/healthz", get(|| async { "ok" }))
        .route("/ws", get(websocket_handler))
        .route("/rooms", get(crate::room::list_rooms))
        .route("/rooms/:room_id", get(crate::room::get_room))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
