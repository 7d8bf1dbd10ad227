//! HTTP API response DTOs for the game server.

use serde::{Deserialize, Serialize};

use crate::{
    common::time::timestamp_to_jst_rfc3339,
    domain::{GamePhase, GameSnapshot, RoomId},
};

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub players: Vec<String>,
    pub phase: String,
    pub moves_made: u8,
    pub created_at: String, // ISO 8601
}

impl RoomSummaryDto {
    pub fn from_snapshot(room: &RoomId, snapshot: &GameSnapshot) -> Self {
        let mut players = vec![snapshot.host.as_str().to_string()];
        if let Some(guest) = &snapshot.guest {
            players.push(guest.as_str().to_string());
        }
        Self {
            room: room.as_str().to_string(),
            players,
            phase: phase_label(snapshot.phase).to_string(),
            moves_made: snapshot.moves_made,
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        }
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::AwaitingOpponent => "awaitingOpponent",
        GamePhase::InProgress => "inProgress",
        GamePhase::Finished(_) => "finished",
    }
}
