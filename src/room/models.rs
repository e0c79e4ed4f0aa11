use serde::{Deserialize, Serialize};

/// A player inside a room, keyed by their connection id.
///
/// The id is opaque and stable for the lifetime of the connection; the name is
/// whatever the client sent at join time and is not validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerModel {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub roll_count: u32,
    pub doubles_count: u32,
    pub is_active: bool,
}

impl PlayerModel {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            score: 0,
            roll_count: 0,
            doubles_count: 0,
            is_active: false,
        }
    }
}

/// Room lifecycle status. Informational only: `Waiting` is observable until
/// the first player joins, after which the room stays `Playing` until it is
/// deleted (win or emptied). There is no transition back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
}

/// Full state of one game room. This is also the wire snapshot broadcast to
/// every connection in the room after each mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomModel {
    pub id: String,
    /// Insertion order is join order and defines the turn rotation.
    pub players: Vec<PlayerModel>,
    /// Last rolled pair, each die in 1..=6.
    pub dice_values: (u8, u8),
    /// Connection id of the turn holder, `None` only while the room is empty.
    pub current_player: Option<String>,
    pub status: RoomStatus,
}

impl RoomModel {
    /// Creates an empty room in its initial state.
    pub fn new(id: String) -> Self {
        Self {
            id,
            players: Vec::new(),
            dice_values: (1, 1),
            current_player: None,
            status: RoomStatus::Waiting,
        }
    }

    /// Check if a player is in this room (by connection id)
    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Connection ids of every player in the room, in join order.
    pub fn player_ids(&self) -> Vec<String> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn find_player(&self, player_id: &str) -> Option<&PlayerModel> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn find_player_mut(&mut self, player_id: &str) -> Option<&mut PlayerModel> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Index of a player in the turn rotation.
    pub fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    /// Recompute every player's `is_active` flag from `current_player`.
    ///
    /// Run after every mutation so the at-most-one-active invariant holds by
    /// construction rather than by incremental bookkeeping.
    pub fn refresh_active_flags(&mut self) {
        for player in &mut self.players {
            player.is_active = self.current_player.as_deref() == Some(player.id.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_starts_in_initial_state() {
        let room = RoomModel::new("test-room".to_string());
        assert!(room.players.is_empty());
        assert_eq!(room.dice_values, (1, 1));
        assert_eq!(room.current_player, None);
        assert_eq!(room.status, RoomStatus::Waiting);
    }

    #[test]
    fn refresh_active_flags_marks_only_the_turn_holder() {
        let mut room = RoomModel::new("test-room".to_string());
        room.players
            .push(PlayerModel::new("a".into(), "Alice".into()));
        room.players.push(PlayerModel::new("b".into(), "Bob".into()));
        room.players[0].is_active = true;
        room.players[1].is_active = true;

        room.current_player = Some("b".to_string());
        room.refresh_active_flags();

        assert!(!room.players[0].is_active);
        assert!(room.players[1].is_active);
    }

    #[test]
    fn refresh_active_flags_clears_everyone_when_unset() {
        let mut room = RoomModel::new("test-room".to_string());
        room.players
            .push(PlayerModel::new("a".into(), "Alice".into()));
        room.players[0].is_active = true;

        room.current_player = None;
        room.refresh_active_flags();

        assert!(!room.players[0].is_active);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RoomStatus::Waiting).unwrap(),
            "\"waiting\""
        );
        assert_eq!(
            serde_json::to_string(&RoomStatus::Playing).unwrap(),
            "\"playing\""
        );
    }
}
