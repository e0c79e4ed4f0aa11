use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::{PlayerModel, RoomModel};
use crate::game::logic::{self, JoinOutcome, RemoveOutcome, RollOutcome};
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Player was added; returns the updated room snapshot
    Joined(RoomModel),
    /// Connection was already in the room; returns the current snapshot
    /// (the join is idempotent, the caller just re-broadcasts)
    AlreadyJoined(RoomModel),
}

impl JoinRoomResult {
    pub fn room(&self) -> &RoomModel {
        match self {
            JoinRoomResult::Joined(room) | JoinRoomResult::AlreadyJoined(room) => room,
        }
    }
}

/// Result of attempting a dice roll
#[derive(Debug, Clone)]
pub enum RollDiceResult {
    /// Room does not exist; the roll is silently dropped
    RoomNotFound,
    /// Roller was not the turn holder; the roll is silently dropped
    NotYourTurn,
    /// Roll applied; returns the updated room snapshot
    Updated(RoomModel),
    /// Roller won. The room has been deleted from the store; `room` is its
    /// final snapshot, kept so the caller still knows who to notify.
    GameOver {
        winner: PlayerModel,
        room: RoomModel,
    },
}

/// One room's outcome from a disconnect sweep
#[derive(Debug, Clone)]
pub enum DisconnectSweepResult {
    /// Player removed, room still occupied; returns the updated snapshot
    Updated(RoomModel),
    /// Player was the last occupant; the room has been deleted
    RoomDeleted(String),
}

/// Trait for room store operations
///
/// Every mutating operation runs its complete read-modify-write while holding
/// the store lock, so operations on the same room never interleave.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically joins a room, creating it in the initial state if the key
    /// is unknown. Idempotent per connection id.
    async fn join_room(
        &self,
        room_id: &str,
        player_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically applies a roll for the given connection. On a win the room
    /// is removed from the store before the result is returned.
    async fn apply_roll(
        &self,
        room_id: &str,
        player_id: &str,
        dice: (u8, u8),
    ) -> Result<RollDiceResult, AppError>;

    /// Atomically removes the connection's player from every room containing
    /// it, deleting rooms that end up empty. Membership is not indexed per
    /// connection, so this scans the whole store.
    async fn disconnect_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<DisconnectSweepResult>, AppError>;

    /// Deletes a room; idempotent.
    async fn remove_room(&self, room_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of RoomRepository. The whole server state lives
/// here; nothing survives a restart.
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let rooms = self.rooms.lock().unwrap();
        let room = rooms.get(room_id).cloned();

        match &room {
            Some(r) => {
                debug!(room_id = %room_id, players = r.player_count(), "Room found")
            }
            None => debug!(room_id = %room_id, "Room not found"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn join_room(
        &self,
        room_id: &str,
        player_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResult, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        // Lazy creation: first join to a key materializes the room
        let room = rooms
            .entry(room_id.to_string())
            .or_insert_with(|| RoomModel::new(room_id.to_string()));

        match logic::join(room, player_id, player_name) {
            JoinOutcome::Joined => {
                info!(
                    room_id = %room_id,
                    player_id = %player_id,
                    player_name = %player_name,
                    player_count = room.player_count(),
                    "Player joined room"
                );
                Ok(JoinRoomResult::Joined(room.clone()))
            }
            JoinOutcome::AlreadyPresent => {
                debug!(room_id = %room_id, player_id = %player_id, "Player already in room");
                Ok(JoinRoomResult::AlreadyJoined(room.clone()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn apply_roll(
        &self,
        room_id: &str,
        player_id: &str,
        dice: (u8, u8),
    ) -> Result<RollDiceResult, AppError> {
        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Roll for unknown room ignored");
                return Ok(RollDiceResult::RoomNotFound);
            }
        };

        match logic::apply_roll(room, player_id, dice) {
            RollOutcome::NotYourTurn => {
                debug!(
                    room_id = %room_id,
                    player_id = %player_id,
                    current_player = ?room.current_player,
                    "Out-of-turn roll ignored"
                );
                Ok(RollDiceResult::NotYourTurn)
            }
            RollOutcome::Continued => {
                debug!(
                    room_id = %room_id,
                    player_id = %player_id,
                    dice = ?dice,
                    "Roll applied"
                );
                Ok(RollDiceResult::Updated(room.clone()))
            }
            RollOutcome::Won(winner) => {
                let final_room = room.clone();
                rooms.remove(room_id);
                info!(
                    room_id = %room_id,
                    winner_id = %winner.id,
                    winner_name = %winner.name,
                    final_score = winner.score,
                    "Game over, room deleted"
                );
                Ok(RollDiceResult::GameOver {
                    winner,
                    room: final_room,
                })
            }
        }
    }

    #[instrument(skip(self))]
    async fn disconnect_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<DisconnectSweepResult>, AppError> {
        let mut rooms = self.rooms.lock().unwrap();
        let mut results = Vec::new();

        // Full scan: connection -> room membership is not tracked separately
        let room_ids: Vec<String> = rooms.keys().cloned().collect();
        for room_id in room_ids {
            let Some(room) = rooms.get_mut(&room_id) else {
                continue;
            };
            match logic::remove_player(room, player_id) {
                RemoveOutcome::NotPresent => {}
                RemoveOutcome::Remaining => {
                    info!(
                        room_id = %room_id,
                        player_id = %player_id,
                        remaining = room.player_count(),
                        "Player removed from room on disconnect"
                    );
                    results.push(DisconnectSweepResult::Updated(room.clone()));
                }
                RemoveOutcome::Emptied => {
                    rooms.remove(&room_id);
                    info!(room_id = %room_id, player_id = %player_id, "Last player left, room deleted");
                    results.push(DisconnectSweepResult::RoomDeleted(room_id));
                }
            }
        }

        if results.is_empty() {
            debug!(player_id = %player_id, "Disconnect sweep found no rooms for player");
        }

        Ok(results)
    }

    #[instrument(skip(self))]
    async fn remove_room(&self, room_id: &str) -> Result<(), AppError> {
        let mut rooms = self.rooms.lock().unwrap();
        if rooms.remove(room_id).is_some() {
            info!(room_id = %room_id, "Room removed");
        } else {
            warn!(room_id = %room_id, "Remove for unknown room ignored");
        }
        Ok(())
    }
}
