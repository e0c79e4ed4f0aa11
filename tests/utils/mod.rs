pub mod mocks;
pub mod setup;

pub use mocks::{MockConnectionManager, ScriptedDice};
pub use setup::TestSetup;
