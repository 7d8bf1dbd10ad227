//! Router assembly and server loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    infrastructure::repository::InMemorySessionRegistry,
    ui::{handler, signal, state::AppState},
};

/// Run the game server until a shutdown signal arrives.
pub async fn run(config: Config) -> Result<(), std::io::Error> {
    let registry = Arc::new(InMemorySessionRegistry::new());
    let state = Arc::new(AppState::new(registry));

    // Game clients are browser-based; the original deployment serves them
    // from a different origin.
    let app = Router::new()
        .route("/", get(handler::root))
        .route("/health", get(handler::health_check))
        .route("/api/rooms", get(handler::get_rooms))
        .route("/ws", get(handler::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Server listening on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await?;

    Ok(())
}
