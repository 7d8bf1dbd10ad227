//! WebSocket marubatsu (tic-tac-toe) game server library.
//!
//! This library provides the server-side session coordinator for a two-player
//! realtime board game: the in-memory registry of active games, the per-game
//! state machine, and the WebSocket message protocol that drives it.

pub mod common;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use ui::run as run_server;
