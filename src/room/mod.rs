// Public API - what other modules can use
pub use repository::{
    DisconnectSweepResult, InMemoryRoomRepository, JoinRoomResult, RollDiceResult, RoomRepository,
};

// Internal modules
pub mod models;
pub mod repository;
