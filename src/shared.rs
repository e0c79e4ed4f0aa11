use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::{DiceRoller, GameService};
use crate::room::repository::RoomRepository;
use crate::websockets::{ConnectionManager, SessionGateway};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub gateway: Arc<SessionGateway>,
}

impl AppState {
    /// Wires the full stack from its injectable pieces. The dice source is a
    /// parameter so tests can script rolls.
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
        dice: Arc<dyn DiceRoller>,
    ) -> Self {
        let game_service = Arc::new(GameService::new(room_repository.clone(), dice));
        let gateway = Arc::new(SessionGateway::new(
            game_service,
            connection_manager.clone(),
        ));
        Self {
            room_repository,
            connection_manager,
            gateway,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Serialization(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
