//! Realtime marubatsu game server.
//!
//! Coordinates two-player tic-tac-toe sessions over WebSocket connections.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin marubatsu-server
//! ```

use clap::Parser;

use marubatsu_server::{config::Config, logger::setup_logger};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = Config::parse();

    // Run the server
    if let Err(e) = marubatsu_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
