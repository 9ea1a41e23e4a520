//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use watchparty::websockets::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    connections: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all connections in the setup
    pub fn for_all_connections(setup: &'a TestSetup) -> Self {
        let connections = setup.connections.iter().map(|s| s.as_str()).collect();
        Self { setup, connections }
    }

    /// Create an assertion for specific connections
    pub fn for_connections(setup: &'a TestSetup, connections: Vec<&'a str>) -> Self {
        Self { setup, connections }
    }

    /// Assert that connections received a specific message type (consumes the message from queue)
    /// and that every recipient saw the same payload
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for connection in &self.connections {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(connection)
                .await;
            let message = message
                .unwrap_or_else(|| panic!("{} should have received a message", connection));

            let msg: WebSocketMessage = serde_json::from_str(&message).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                connection
            );
            assert!(msg.meta.is_some(), "{} message has no meta", connection);
            messages.push(msg);
        }

        let first_payload = &messages[0].payload;
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                &msg.payload, first_payload,
                "Connection {} payload differs from connection {}",
                self.connections[i], self.connections[0]
            );
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that connections have no unread messages
    pub async fn received_no_messages(self) {
        for connection in &self.connections {
            let messages = self
                .setup
                .mock_conn_manager
                .get_messages_for(connection)
                .await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                connection,
                messages
            );
        }
    }

    /// Count how many unread messages of a specific type a connection has (non-consuming)
    pub async fn count_message_type(&self, connection: &str, msg_type: MessageType) -> usize {
        let messages = self
            .setup
            .mock_conn_manager
            .get_messages_for(connection)
            .await;
        messages
            .iter()
            .filter_map(|msg_str| serde_json::from_str::<WebSocketMessage>(msg_str).ok())
            .filter(|msg| msg.message_type == msg_type)
            .count()
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    pub payload: serde_json::Value,
}

impl MessageContent {
    /// Assert a roomMembers payload
    pub fn with_members(self, expected: Vec<&str>) -> Self {
        let actual: Vec<String> = serde_json::from_value(self.payload.clone()).unwrap();
        assert_eq!(actual, expected);
        self
    }

    /// Assert a relayed chatMessage
    pub fn with_chat(self, username: &str, message: &str) -> Self {
        assert_eq!(self.payload["username"], username);
        assert_eq!(self.payload["message"], message);
        self
    }

    /// Assert the video block of a roomData payload
    pub fn with_video(self, video_id: &str, is_playing: bool, current_time: f64) -> Self {
        let video = &self.payload["video"];
        assert_eq!(video["videoId"], video_id);
        assert_eq!(video["isPlaying"], is_playing);
        assert_eq!(video["currentTime"].as_f64().unwrap(), current_time);
        self
    }

    /// Assert the chat history of a roomData payload, as (username, message) pairs
    pub fn with_history(self, expected: Vec<(&str, &str)>) -> Self {
        let chat = self.payload["chat"].as_array().unwrap();
        let actual: Vec<(&str, &str)> = chat
            .iter()
            .map(|c| {
                (
                    c["username"].as_str().unwrap(),
                    c["message"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(actual, expected);
        self
    }

    /// Assert a relayed videoControl
    pub fn with_control(self, action: &str, current_time: f64) -> Self {
        assert_eq!(self.payload["action"], action);
        assert_eq!(self.payload["currentTime"].as_f64().unwrap(), current_time);
        self
    }

    /// Assert an error payload kind
    pub fn with_error_kind(self, kind: &str) -> Self {
        assert_eq!(self.payload["kind"], kind);
        assert!(self.payload["message"].is_string());
        self
    }
}
