//! Domain layer for the game server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod board;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use board::{Board, Cell, Mark};
pub use entity::{GamePhase, GameSession, GameSnapshot, Outcome};
pub use error::{GameError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use repository::{SessionHandle, SessionRegistry};
pub use value_object::{CellPosition, ConnectionId, PlayerName, RoomId, Timestamp};

#[cfg(test)]
pub use repository::MockSessionRegistry;
