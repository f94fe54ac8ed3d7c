//! Conversion logic between DTOs and domain values.

use crate::domain::{Notification, PlaybackState};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain → DTO
// ========================================

impl From<PlaybackState> for dto::SyncPayload {
    fn from(state: PlaybackState) -> Self {
        Self {
            is_playing: state.is_playing,
            current_time: state.current_time,
            last_update: state.last_update.value(),
        }
    }
}

impl From<Notification> for dto::ServerMessage {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::Config {
                volume_step,
                skip_seconds,
            } => Self::Config {
                volume_step,
                skip_seconds,
            },
            Notification::Sync(state) => Self::Sync(state.into()),
            Notification::Rejected(message) => Self::Error { message },
        }
    }
}
