//! Server-to-viewer notifications.

use super::entity::PlaybackState;

/// Everything the server pushes to a viewer over the synchronization channel.
///
/// The wire representation lives in `infrastructure::dto::websocket`.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Session configuration, sent once right after a viewer is accepted
    Config { volume_step: u32, skip_seconds: u32 },
    /// Authoritative playback state
    Sync(PlaybackState),
    /// Connection refused; the channel is closed right after
    Rejected(String),
}
