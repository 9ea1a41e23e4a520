use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::RoomSummary;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all live rooms
///
/// GET /rooms
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomSummary>> {
    let rooms = state.room_repository.list_rooms().await;

    let mut summaries = Vec::with_capacity(rooms.len());
    for room in &rooms {
        let member_count = state.membership.connection_count(&room.id).await;
        summaries.push(RoomSummary::from_room(room, member_count));
    }

    info!(room_count = summaries.len(), "Rooms listed");
    Json(summaries)
}

/// HTTP handler for a single room
///
/// GET /rooms/:room_id
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSummary>, AppError> {
    let room = state
        .room_repository
        .get_room(&room_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;

    let member_count = state.membership.connection_count(&room.id).await;
    Ok(Json(RoomSummary::from_room(&room, member_count)))
}
