// Turn logic for a single room. These functions mutate a RoomModel in place
// and report what happened through outcome enums; the repository calls them
// while holding the store lock, so each call is one serialized
// read-modify-write. Dice values are passed in by the caller, which keeps
// everything here deterministic under test.

use crate::game::score::{self, WINNING_SCORE};
use crate::room::models::{PlayerModel, RoomModel, RoomStatus};

/// Result of adding a player to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Player was appended to the rotation.
    Joined,
    /// Connection already had a player here; nothing changed.
    AlreadyPresent,
}

/// Result of applying a roll to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// Roller is not the turn holder; the room was left untouched.
    NotYourTurn,
    /// Roll applied, game continues. Dice stored, turn advanced unless the
    /// roll was doubles.
    Continued,
    /// Roller reached the winning score. Carries the winner's final snapshot;
    /// the room is left as-is for the caller to tear down.
    Won(PlayerModel),
}

/// Result of removing a player from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Connection had no player in this room.
    NotPresent,
    /// Player removed and the room still has occupants.
    Remaining,
    /// Player removed and the room is now empty; the caller must delete it.
    Emptied,
}

/// Adds a player to the room, idempotent per connection id.
///
/// The first player to ever join becomes the turn holder and flips the room
/// to `Playing`.
pub fn join(room: &mut RoomModel, player_id: &str, name: &str) -> JoinOutcome {
    if room.has_player(player_id) {
        return JoinOutcome::AlreadyPresent;
    }

    let was_empty = room.players.is_empty();
    room.players
        .push(PlayerModel::new(player_id.to_string(), name.to_string()));

    if was_empty {
        room.current_player = Some(player_id.to_string());
        room.status = RoomStatus::Playing;
    }

    room.refresh_active_flags();
    JoinOutcome::Joined
}

/// Applies a dice roll for `player_id`.
///
/// Out-of-turn rolls are ignored, not rejected: stale clients are expected
/// and harmless. Doubles score double and grant a bonus turn; otherwise the
/// turn passes round-robin in join order.
pub fn apply_roll(room: &mut RoomModel, player_id: &str, dice: (u8, u8)) -> RollOutcome {
    if room.current_player.as_deref() != Some(player_id) {
        return RollOutcome::NotYourTurn;
    }

    let doubles = score::is_doubles(dice);

    // Turn holder is always present while current_player is set.
    let Some(player) = room.find_player_mut(player_id) else {
        return RollOutcome::NotYourTurn;
    };

    player.score = score::compute_score(player.score, dice);
    player.roll_count += 1;
    if doubles {
        player.doubles_count += 1;
    }

    if player.score >= WINNING_SCORE {
        return RollOutcome::Won(player.clone());
    }

    room.dice_values = dice;
    if !doubles {
        if let Some(index) = room.player_index(player_id) {
            let next = (index + 1) % room.players.len();
            room.current_player = Some(room.players[next].id.clone());
        }
    }

    room.refresh_active_flags();
    RollOutcome::Continued
}

/// Removes a player from the room, reassigning the turn to the first
/// remaining player (join order) when the turn holder left.
pub fn remove_player(room: &mut RoomModel, player_id: &str) -> RemoveOutcome {
    if !room.has_player(player_id) {
        return RemoveOutcome::NotPresent;
    }

    room.players.retain(|p| p.id != player_id);

    if room.players.is_empty() {
        room.current_player = None;
        return RemoveOutcome::Emptied;
    }

    if room.current_player.as_deref() == Some(player_id) {
        room.current_player = Some(room.players[0].id.clone());
    }

    room.refresh_active_flags();
    RemoveOutcome::Remaining
}
