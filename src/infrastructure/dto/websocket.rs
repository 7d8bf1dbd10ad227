//! WebSocket message DTOs for the game protocol.
//!
//! Inbound events arrive as a tagged enum; outbound events are individual
//! structs carrying their `type` field explicitly. Board cells travel as
//! `""` / `"X"` / `"O"` and the winner field as `null` / `"X"` / `"O"` /
//! `"draw"`, matching the protocol the game clients already speak.

use serde::{Deserialize, Serialize};

use crate::domain::{GamePhase, GameSnapshot, Mark, Outcome};

/// Inbound protocol events.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Request to create-or-join a room
    JoinGame { username: String, room: String },
    /// Request to place a mark; row/col are validated before use
    MakeMove {
        room: String,
        row: usize,
        col: usize,
        username: String,
    },
    /// Request to reset a room's board
    ResetGame { room: String },
}

/// Outbound message type enum
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    GameCreated,
    RoomFull,
    GameStart,
    MoveMade,
    GameReset,
    ActionRejected,
}

/// 3×3 grid of cell labels as sent on the wire.
pub type BoardCells = [[String; 3]; 3];

/// Acknowledgment sent to the creator of a room only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreatedMessage {
    pub r#type: MessageType,
    pub room: String,
}

/// Rejection sent to a requester whose target room has both slots filled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomFullMessage {
    pub r#type: MessageType,
    pub message: String,
}

/// Broadcast to the room when the second player joins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStartMessage {
    pub r#type: MessageType,
    pub board: BoardCells,
    pub players: Vec<String>,
    pub current_player: String,
}

/// Broadcast to the room on every accepted move
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMadeMessage {
    pub r#type: MessageType,
    pub board: BoardCells,
    pub current_player: String,
    pub winner: Option<String>,
    pub is_draw: bool,
}

/// Broadcast to the room on reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResetMessage {
    pub r#type: MessageType,
    pub board: BoardCells,
    pub current_player: String,
    pub winner: Option<String>,
}

/// Rejection sent to the acting connection only, never broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRejectedMessage {
    pub r#type: MessageType,
    pub message: String,
}

impl GameStartMessage {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        let mut players = vec![snapshot.host.as_str().to_string()];
        if let Some(guest) = &snapshot.guest {
            players.push(guest.as_str().to_string());
        }
        Self {
            r#type: MessageType::GameStart,
            board: board_cells(snapshot),
            players,
            current_player: snapshot.current_turn.as_str().to_string(),
        }
    }
}

impl MoveMadeMessage {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            r#type: MessageType::MoveMade,
            board: board_cells(snapshot),
            current_player: snapshot.current_turn.as_str().to_string(),
            winner: winner_label(snapshot.phase),
            is_draw: matches!(snapshot.phase, GamePhase::Finished(Outcome::Draw)),
        }
    }
}

impl GameResetMessage {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            r#type: MessageType::GameReset,
            board: board_cells(snapshot),
            current_player: snapshot.current_turn.as_str().to_string(),
            winner: winner_label(snapshot.phase),
        }
    }
}

/// Convert a snapshot's board to the wire format.
fn board_cells(snapshot: &GameSnapshot) -> BoardCells {
    let cells = *snapshot.board.rows();
    cells.map(|row| {
        row.map(|cell| match cell {
            Some(Mark::X) => "X".to_string(),
            Some(Mark::O) => "O".to_string(),
            None => String::new(),
        })
    })
}

/// The wire label for the winner field: `"X"` / `"O"` on a win, `"draw"` on
/// a draw, absent while the game is running.
fn winner_label(phase: GamePhase) -> Option<String> {
    match phase {
        GamePhase::Finished(Outcome::Win(mark)) => Some(mark.to_string()),
        GamePhase::Finished(Outcome::Draw) => Some("draw".to_string()),
        _ => None,
    }
}
