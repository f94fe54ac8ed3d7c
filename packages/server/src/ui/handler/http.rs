//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use watchparty_shared::time::timestamp_to_rfc3339;

use crate::{infrastructure::dto::http::PlaybackStateDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current playback state (for debugging)
pub async fn get_playback_state(State(state): State<Arc<AppState>>) -> Json<PlaybackStateDto> {
    let snapshot = state.get_playback_state_usecase.execute().await;
    let last_update = snapshot.state.last_update.value();

    Json(PlaybackStateDto {
        is_playing: snapshot.state.is_playing,
        current_time: snapshot.state.current_time,
        last_update,
        last_update_rfc3339: timestamp_to_rfc3339(last_update),
        estimated_position: snapshot.estimated_position,
        connected_viewers: snapshot.connected_viewers,
    })
}
