use rand::Rng;

/// Score a player reaches the win condition at.
pub const WINNING_SCORE: u32 = 100;

/// Computes a player's new score from a dice outcome.
///
/// Doubles pay double: a matched pair adds twice its sum, anything else adds
/// the plain sum. Pure and total for dice in 1..=6.
pub fn compute_score(current_score: u32, dice: (u8, u8)) -> u32 {
    let sum = u32::from(dice.0) + u32::from(dice.1);
    if is_doubles(dice) {
        current_score + sum * 2
    } else {
        current_score + sum
    }
}

/// True when both dice show the same value.
pub fn is_doubles(dice: (u8, u8)) -> bool {
    dice.0 == dice.1
}

/// Rolls two independent dice, each uniform in 1..=6.
///
/// Not cryptographic; this only has to be fair, not unpredictable.
pub fn roll_dice() -> (u8, u8) {
    let mut rng = rand::rng();
    (rng.random_range(1..=6), rng.random_range(1..=6))
}
