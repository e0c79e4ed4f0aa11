// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use gateway::{resolve_room_key, SessionGateway, DEFAULT_ROOM_KEY};
pub use handler::websocket_handler;
pub use messages::{
    JoinGamePayload, MessageType, RollDicePayload, WebSocketMessage, WebSocketMessageMeta,
};

// Internal modules
mod connection_manager;
mod gateway;
mod handler;
pub mod messages;
