//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::GameError;

/// Errors returned by [`crate::usecase::MakeMoveUseCase`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MakeMoveError {
    /// The named room has never been created
    #[error("room '{0}' does not exist")]
    RoomNotFound(String),

    /// The session rejected the move
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Errors returned by [`crate::usecase::ResetGameUseCase`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResetError {
    /// The named room has never been created
    #[error("room '{0}' does not exist")]
    RoomNotFound(String),
}
