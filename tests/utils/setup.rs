use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use watchparty::{
    config::ServerConfig,
    room::{repository::InMemoryRoomRepository, types::UnknownActionPolicy},
    session::{InMemorySessionRepository, SessionRepository},
    websockets::ConnectionManager,
    AppState, WebsocketReceiveHandler,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app_state: AppState,
    pub room_repository: Arc<InMemoryRoomRepository>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub connections: Vec<String>,
    pub _worker_handle: JoinHandle<()>,
}

pub struct TestSetupBuilder {
    connections: Vec<String>,
    config: ServerConfig,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            connections: vec![],
            config: ServerConfig::default(),
        }
    }

    /// Open these connections before the test starts; none of them has joined a room
    pub fn with_connections(mut self, connections: Vec<&str>) -> Self {
        self.connections = connections.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_connections(self) -> Self {
        self.with_connections(vec!["alice", "bob"])
    }

    pub fn with_three_connections(self) -> Self {
        self.with_connections(vec!["alice", "bob", "carol"])
    }

    pub fn with_unknown_action_policy(mut self, policy: UnknownActionPolicy) -> Self {
        self.config.unknown_action_policy = policy;
        self
    }

    pub fn with_chat_history_limit(mut self, limit: usize) -> Self {
        self.config.chat_history_limit = limit;
        self
    }

    pub async fn build(self) -> TestSetup {
        let room_repository = Arc::new(InMemoryRoomRepository::new(self.config.chat_history_limit));
        let mock_conn_manager = Arc::new(MockConnectionManager::new());

        let (app_state, worker) = AppState::with_components(
            room_repository.clone(),
            Arc::new(InMemorySessionRepository::new()),
            mock_conn_manager.clone(),
            &self.config,
        );
        let worker_handle = worker.start();

        for connection_id in &self.connections {
            let (tx, _rx) = mpsc::unbounded_channel();
            app_state
                .connection_manager
                .add_connection(connection_id.clone(), tx)
                .await;
            app_state.session_repository.connect(connection_id).await;
        }

        let input_handler = WebsocketReceiveHandler::new(
            app_state.event_bus.clone(),
            app_state.connection_manager.clone(),
        );

        TestSetup {
            app_state,
            room_repository,
            mock_conn_manager,
            input_handler,
            connections: self.connections,
            _worker_handle: worker_handle,
        }
    }
}
