use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::room::models::{PlayerModel, RoomModel};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    // Client -> Server
    JoinGame,
    RollDice,

    // Server -> Client
    GameState,
    GameOver,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGamePayload {
    /// Missing or empty resolves to the default room key
    pub room_id: Option<String>,
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollDicePayload {
    pub room_id: Option<String>,
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Create a game-state message carrying a full room snapshot
    pub fn game_state(room: &RoomModel) -> Self {
        Self::new(MessageType::GameState, serde_json::to_value(room).unwrap())
    }

    /// Create a game-over message carrying the winner's final snapshot
    pub fn game_over(winner: &PlayerModel) -> Self {
        Self::new(MessageType::GameOver, serde_json::to_value(winner).unwrap())
    }
}
