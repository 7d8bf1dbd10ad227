//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// PlayerName validation error
    #[error("PlayerName cannot be empty")]
    PlayerNameEmpty,

    /// PlayerName too long error
    #[error("PlayerName cannot exceed {max} characters (got {actual})")]
    PlayerNameTooLong { max: usize, actual: usize },

    /// Cell position out of range error
    #[error("cell ({row}, {col}) is outside the 3x3 board")]
    CellOutOfRange { row: usize, col: usize },
}

/// Errors related to game session transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Both player slots are already taken
    #[error("room is full")]
    RoomFull,

    /// The requester already occupies a slot in this room
    #[error("player '{0}' is already in this room")]
    AlreadyJoined(String),

    /// A move was attempted before the second player joined
    #[error("waiting for an opponent to join")]
    NotStarted,

    /// A move was attempted after the game reached an outcome
    #[error("game is already finished")]
    GameOver,

    /// A move was attempted by a player outside both slots
    #[error("player '{0}' is not part of this game")]
    UnknownPlayer(String),

    /// A move was attempted out of turn
    #[error("it is not '{0}'s turn")]
    NotYourTurn(String),

    /// The targeted cell already holds a mark
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}
