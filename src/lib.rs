// Library crate for the dice game server
// This file exposes the public API for integration tests

pub mod game;
pub mod room;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use game::{DiceRoller, GameService, RandomDice};
pub use room::{models::RoomModel, repository::InMemoryRoomRepository, repository::RoomRepository};
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, InMemoryConnectionManager, MessageType, SessionGateway, WebSocketMessage,
};
