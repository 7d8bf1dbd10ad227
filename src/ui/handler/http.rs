//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RoomSummaryDto, ui::state::AppState};

/// Root endpoint: fixed liveness text
pub async fn root() -> &'static str {
    "Game server is running"
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Get a summary of all live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.registry.list().await;

    let mut summaries: Vec<RoomSummaryDto> = rooms
        .iter()
        .map(|(room, snapshot)| RoomSummaryDto::from_snapshot(room, snapshot))
        .collect();

    // Sort by room id for consistent ordering
    summaries.sort_by(|a, b| a.room.cmp(&b.room));

    Json(summaries)
}
