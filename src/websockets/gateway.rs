use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::game::GameService;
use crate::room::models::RoomModel;
use crate::room::repository::{DisconnectSweepResult, RollDiceResult};
use crate::shared::AppError;
use crate::websockets::connection_manager::ConnectionManager;
use crate::websockets::messages::{
    JoinGamePayload, MessageType, RollDicePayload, WebSocketMessage,
};

/// Room key used when a client sends no room id (or an empty one).
pub const DEFAULT_ROOM_KEY: &str = "main";

/// Resolves a client-supplied room id to a store key.
pub fn resolve_room_key(room_id: Option<&str>) -> String {
    match room_id {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => DEFAULT_ROOM_KEY.to_string(),
    }
}

/// Translates inbound client events into game operations and game outcomes
/// into room broadcasts. Invalid input never produces an error frame: the
/// protocol is best-effort, bad events are logged and dropped.
pub struct SessionGateway {
    game_service: Arc<GameService>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl SessionGateway {
    pub fn new(
        game_service: Arc<GameService>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            game_service,
            connection_manager,
        }
    }

    /// Entry point for one raw inbound frame from a connection.
    pub async fn handle_message(&self, connection_id: &str, raw: &str) {
        let message: WebSocketMessage = match serde_json::from_str(raw) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message, dropping"
                );
                return;
            }
        };

        let result = match message.message_type {
            MessageType::JoinGame => {
                match serde_json::from_value::<JoinGamePayload>(message.payload) {
                    Ok(payload) => self.handle_join(connection_id, payload).await,
                    Err(e) => {
                        warn!(
                            connection_id = %connection_id,
                            error = %e,
                            "Malformed join-game payload, dropping"
                        );
                        Ok(())
                    }
                }
            }
            MessageType::RollDice => {
                match serde_json::from_value::<RollDicePayload>(message.payload) {
                    Ok(payload) => self.handle_roll(connection_id, payload).await,
                    Err(e) => {
                        warn!(
                            connection_id = %connection_id,
                            error = %e,
                            "Malformed roll-dice payload, dropping"
                        );
                        Ok(())
                    }
                }
            }
            other => {
                debug!(
                    connection_id = %connection_id,
                    message_type = ?other,
                    "Unhandled inbound message type"
                );
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "Failed to handle inbound message"
            );
        }
    }

    pub async fn handle_join(
        &self,
        connection_id: &str,
        payload: JoinGamePayload,
    ) -> Result<(), AppError> {
        let room_key = resolve_room_key(payload.room_id.as_deref());
        info!(
            connection_id = %connection_id,
            room_id = %room_key,
            player_name = %payload.player_name,
            "Handling join-game"
        );

        let result = self
            .game_service
            .join(&room_key, connection_id, &payload.player_name)
            .await?;

        // Re-joins still re-broadcast the current snapshot
        self.broadcast_state(result.room()).await
    }

    pub async fn handle_roll(
        &self,
        connection_id: &str,
        payload: RollDicePayload,
    ) -> Result<(), AppError> {
        let room_key = resolve_room_key(payload.room_id.as_deref());
        debug!(
            connection_id = %connection_id,
            room_id = %room_key,
            "Handling roll-dice"
        );

        match self.game_service.roll(&room_key, connection_id).await? {
            RollDiceResult::RoomNotFound | RollDiceResult::NotYourTurn => {
                // Stale or out-of-turn roll: silently ignored
                Ok(())
            }
            RollDiceResult::Updated(room) => self.broadcast_state(&room).await,
            RollDiceResult::GameOver { winner, room } => {
                info!(
                    room_id = %room.id,
                    winner_id = %winner.id,
                    winner_name = %winner.name,
                    final_score = winner.score,
                    "Broadcasting game-over"
                );
                let message = serde_json::to_string(&WebSocketMessage::game_over(&winner))?;
                self.connection_manager
                    .send_to_connections(&room.player_ids(), &message)
                    .await;
                Ok(())
            }
        }
    }

    /// Disconnect sweep: drop the player from every room and notify the
    /// rooms that still have occupants.
    pub async fn handle_disconnect(&self, connection_id: &str) -> Result<(), AppError> {
        info!(connection_id = %connection_id, "Handling disconnect");

        for result in self.game_service.disconnect(connection_id).await? {
            match result {
                DisconnectSweepResult::Updated(room) => {
                    self.broadcast_state(&room).await?;
                }
                DisconnectSweepResult::RoomDeleted(room_id) => {
                    // No occupants remain, nothing to broadcast
                    debug!(room_id = %room_id, "Room emptied by disconnect");
                }
            }
        }
        Ok(())
    }

    async fn broadcast_state(&self, room: &RoomModel) -> Result<(), AppError> {
        let message = serde_json::to_string(&WebSocketMessage::game_state(room))?;
        self.connection_manager
            .send_to_connections(&room.player_ids(), &message)
            .await;
        Ok(())
    }
}
