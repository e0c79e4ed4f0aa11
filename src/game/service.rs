use std::sync::Arc;
use tracing::debug;

use crate::game::score;
use crate::room::repository::{
    DisconnectSweepResult, JoinRoomResult, RollDiceResult, RoomRepository,
};
use crate::shared::AppError;

/// Source of dice values. Production uses the thread-local RNG; tests inject
/// scripted rolls so turn flow is deterministic.
pub trait DiceRoller: Send + Sync {
    fn roll(&self) -> (u8, u8);
}

/// Fair dice from `rand::rng()`.
pub struct RandomDice;

impl DiceRoller for RandomDice {
    fn roll(&self) -> (u8, u8) {
        score::roll_dice()
    }
}

/// Orchestrates game operations on top of the room store. Owns the dice
/// source; everything below this layer is deterministic.
pub struct GameService {
    room_repository: Arc<dyn RoomRepository>,
    dice: Arc<dyn DiceRoller>,
}

impl GameService {
    pub fn new(room_repository: Arc<dyn RoomRepository>, dice: Arc<dyn DiceRoller>) -> Self {
        Self {
            room_repository,
            dice,
        }
    }

    /// Join a connection to a room, creating the room if needed.
    pub async fn join(
        &self,
        room_id: &str,
        player_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResult, AppError> {
        self.room_repository
            .join_room(room_id, player_id, player_name)
            .await
    }

    /// Roll for a connection. Rolls from non-turn-holders and rolls into
    /// unknown rooms come back as ignorable results, not errors.
    pub async fn roll(&self, room_id: &str, player_id: &str) -> Result<RollDiceResult, AppError> {
        let dice = self.dice.roll();
        debug!(room_id = %room_id, player_id = %player_id, dice = ?dice, "Dice rolled");
        self.room_repository
            .apply_roll(room_id, player_id, dice)
            .await
    }

    /// Remove a disconnected connection from every room that contains it.
    pub async fn disconnect(
        &self,
        player_id: &str,
    ) -> Result<Vec<DisconnectSweepResult>, AppError> {
        self.room_repository.disconnect_player(player_id).await
    }
}
