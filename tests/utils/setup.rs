use std::sync::Arc;

use dicepit::room::models::{PlayerModel, RoomModel};
use dicepit::websockets::MessageType;
use dicepit::{GameService, InMemoryRoomRepository, SessionGateway, WebSocketMessage};

use super::mocks::{MockConnectionManager, ScriptedDice};

/// Full stack below the socket: gateway, service, repository, mock
/// connections, scripted dice.
pub struct TestSetup {
    pub gateway: SessionGateway,
    pub repository: Arc<InMemoryRoomRepository>,
    pub connections: Arc<MockConnectionManager>,
    pub dice: Arc<ScriptedDice>,
}

impl TestSetup {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let connections = Arc::new(MockConnectionManager::new());
        let dice = Arc::new(ScriptedDice::new());
        let game_service = Arc::new(GameService::new(repository.clone(), dice.clone()));
        let gateway = SessionGateway::new(game_service, connections.clone());

        Self {
            gateway,
            repository,
            connections,
            dice,
        }
    }

    /// Sends a join-game frame through the full inbound parse path.
    pub async fn join(&self, connection_id: &str, room_id: Option<&str>, player_name: &str) {
        let raw = serde_json::json!({
            "type": "join-game",
            "payload": { "roomId": room_id, "playerName": player_name },
        })
        .to_string();
        self.gateway.handle_message(connection_id, &raw).await;
    }

    /// Scripts the next dice value and sends a roll-dice frame.
    pub async fn roll(&self, connection_id: &str, room_id: Option<&str>, dice: (u8, u8)) {
        self.dice.push(dice);
        let raw = serde_json::json!({
            "type": "roll-dice",
            "payload": { "roomId": room_id },
        })
        .to_string();
        self.gateway.handle_message(connection_id, &raw).await;
    }

    /// Sends a roll-dice frame without scripting dice; only valid when the
    /// roll is expected to be ignored before any dice are thrown.
    pub async fn roll_expecting_ignore(&self, connection_id: &str, room_id: Option<&str>) {
        // The service still draws dice before the turn check, so script a
        // throwaway value
        self.roll(connection_id, room_id, (1, 2)).await;
    }

    pub async fn disconnect(&self, connection_id: &str) {
        self.gateway
            .handle_disconnect(connection_id)
            .await
            .expect("disconnect handling failed");
    }

    /// All frames sent to a connection, parsed into envelopes.
    pub async fn messages_for(&self, connection_id: &str) -> Vec<WebSocketMessage> {
        self.connections
            .messages_for(connection_id)
            .await
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("unparseable outbound frame"))
            .collect()
    }

    /// The most recent game-state snapshot sent to a connection.
    pub async fn last_game_state(&self, connection_id: &str) -> RoomModel {
        let snapshot = self
            .messages_for(connection_id)
            .await
            .into_iter()
            .rev()
            .find(|m| m.message_type == MessageType::GameState)
            .expect("no game-state frame was sent");
        serde_json::from_value(snapshot.payload).expect("malformed game-state payload")
    }

    /// The game-over winner sent to a connection, if any.
    pub async fn game_over_winner(&self, connection_id: &str) -> Option<PlayerModel> {
        self.messages_for(connection_id)
            .await
            .into_iter()
            .rev()
            .find(|m| m.message_type == MessageType::GameOver)
            .map(|m| serde_json::from_value(m.payload).expect("malformed game-over payload"))
    }
}
