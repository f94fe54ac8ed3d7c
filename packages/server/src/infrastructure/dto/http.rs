//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /api/state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStateDto {
    pub is_playing: bool,
    pub current_time: f64,
    pub last_update: i64,
    /// `lastUpdate` in RFC 3339 (UTC)
    pub last_update_rfc3339: Option<String>,
    /// Position extrapolated to the time of the request
    pub estimated_position: f64,
    pub connected_viewers: usize,
}
