mod game;
mod room;
mod shared;
mod websockets;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use game::RandomDice;
use room::repository::InMemoryRoomRepository;
use shared::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use websockets::{websocket_handler, InMemoryConnectionManager};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicepit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dice game server");

    // Create shared application state with dependency injection
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let connection_manager = Arc::new(InMemoryConnectionManager::new());
    let app_state = AppState::new(room_repository, connection_manager, Arc::new(RandomDice));

    // Browser clients connect cross-origin, so CORS is scoped to the
    // configured frontend origin (any origin when unset)
    let cors = match std::env::var("DICEPIT_ALLOWED_ORIGIN") {
        Ok(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .expect("DICEPIT_ALLOWED_ORIGIN must be a valid origin"),
            )
            .allow_methods([Method::GET, Method::POST]),
        Err(_) => CorsLayer::permissive(),
    };

    let app = Router::new()
        .route("/", get(|| async { "dicepit" }))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let port = std::env::var("DICEPIT_PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Server running on http://localhost:{port}");
    axum::serve(listener, app).await.unwrap();
}
