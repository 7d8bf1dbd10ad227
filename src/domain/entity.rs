//! Core domain model: the per-room game session state machine.

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Mark},
    error::GameError,
    value_object::{CellPosition, PlayerName, Timestamp},
};

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The given mark completed a line
    Win(Mark),
    /// All nine cells filled without a completed line
    Draw,
}

/// Lifecycle phase of a game session.
///
/// An outcome only exists in `Finished`, so "outcome set while the game is
/// still running" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Only the host has joined; the guest slot is empty
    AwaitingOpponent,
    /// Both slots filled and no outcome yet. After a reset this phase can
    /// also hold with the guest slot still empty (see [`GameSession::reset`]).
    InProgress,
    /// The game reached an outcome; only a reset leaves this phase
    Finished(Outcome),
}

/// Immutable read model of a session, handed to the UI layer for broadcasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub host: PlayerName,
    pub guest: Option<PlayerName>,
    pub current_turn: PlayerName,
    pub phase: GamePhase,
    pub moves_made: u8,
    pub created_at: Timestamp,
}

/// A single room's game state.
///
/// The host (slot 0, always the room's creator) plays `X`; the guest
/// (slot 1, the second distinct joiner) plays `O`. Sessions are created on
/// the first join of a room and live for the rest of the process; they are
/// mutated in place by join, move and reset transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub board: Board,
    pub host: PlayerName,
    pub guest: Option<PlayerName>,
    pub current_turn: PlayerName,
    pub phase: GamePhase,
    pub moves_made: u8,
    pub created_at: Timestamp,
}

impl GameSession {
    /// Create a fresh session with the given host. The host moves first.
    pub fn new(host: PlayerName, created_at: Timestamp) -> Self {
        Self {
            board: Board::new(),
            current_turn: host.clone(),
            host,
            guest: None,
            phase: GamePhase::AwaitingOpponent,
            moves_made: 0,
            created_at,
        }
    }

    /// Fill the guest slot with the second distinct joiner.
    ///
    /// # Errors
    ///
    /// * [`GameError::AlreadyJoined`] if the requester is the host
    /// * [`GameError::RoomFull`] if the guest slot is already taken
    pub fn join(&mut self, player: PlayerName) -> Result<(), GameError> {
        if player == self.host {
            return Err(GameError::AlreadyJoined(player.into_string()));
        }
        if self.guest.is_some() {
            return Err(GameError::RoomFull);
        }
        self.guest = Some(player);
        self.phase = GamePhase::InProgress;
        Ok(())
    }

    /// Apply one move: write the requester's mark, then detect win or draw.
    ///
    /// On success the session either swaps the turn to the other slot or
    /// transitions to `Finished`. On error nothing is mutated.
    ///
    /// # Errors
    ///
    /// * [`GameError::NotStarted`] before the guest slot is filled
    /// * [`GameError::GameOver`] once the session is finished
    /// * [`GameError::UnknownPlayer`] if the requester holds no slot
    /// * [`GameError::NotYourTurn`] if it is the other slot's turn
    /// * [`GameError::CellOccupied`] if the target cell is non-empty
    pub fn make_move(
        &mut self,
        player: &PlayerName,
        pos: CellPosition,
    ) -> Result<(), GameError> {
        match self.phase {
            GamePhase::AwaitingOpponent => return Err(GameError::NotStarted),
            GamePhase::Finished(_) => return Err(GameError::GameOver),
            GamePhase::InProgress => {}
        }
        // A reset before the second join leaves the session InProgress with
        // an empty guest slot; moves are still impossible until someone joins.
        let Some(guest) = self.guest.clone() else {
            return Err(GameError::NotStarted);
        };
        let mark = self
            .mark_of(player)
            .ok_or_else(|| GameError::UnknownPlayer(player.as_str().to_string()))?;
        if *player != self.current_turn {
            return Err(GameError::NotYourTurn(player.as_str().to_string()));
        }
        if self.board.cell(pos).is_some() {
            return Err(GameError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        self.board.place(pos, mark);
        self.moves_made += 1;

        if let Some(winner) = self.board.winner() {
            self.phase = GamePhase::Finished(Outcome::Win(winner));
        } else if self.moves_made == 9 {
            self.phase = GamePhase::Finished(Outcome::Draw);
        } else {
            self.current_turn = if self.current_turn == self.host {
                guest
            } else {
                self.host.clone()
            };
        }
        Ok(())
    }

    /// Reset the session for a rematch.
    ///
    /// The board empties, the move counter clears and the host moves first
    /// again. Slot identities are preserved. The phase becomes `InProgress`
    /// unconditionally, even when the guest slot is still empty.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.moves_made = 0;
        self.current_turn = self.host.clone();
        self.phase = GamePhase::InProgress;
    }

    /// The mark belonging to the given player, if they hold a slot.
    pub fn mark_of(&self, player: &PlayerName) -> Option<Mark> {
        if *player == self.host {
            Some(Mark::X)
        } else if self.guest.as_ref() == Some(player) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Take an immutable snapshot for broadcasting.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            host: self.host.clone(),
            guest: self.guest.clone(),
            current_turn: self.current_turn.clone(),
            phase: self.phase,
            moves_made: self.moves_made,
            created_at: self.created_at,
        }
    }
}
