// Public API - what other modules can use
pub use logic::{JoinOutcome, RemoveOutcome, RollOutcome};
pub use score::{compute_score, is_doubles, roll_dice, WINNING_SCORE};
pub use service::{DiceRoller, GameService, RandomDice};

// Internal modules
pub mod logic;
pub mod score;
mod service;
