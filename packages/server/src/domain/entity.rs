//! Domain entities.

use super::value_object::Timestamp;

/// Playback position handed out before anyone has touched the controls
const INITIAL_POSITION_SECONDS: f64 = 1.0;

/// The single shared playback state.
///
/// `current_time` is only an exact measurement at `last_update`; later positions
/// are extrapolated from wall-clock time while `is_playing` is set. The value is
/// always replaced as a whole, never field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Logical playback position in seconds
    pub current_time: f64,
    /// Moment `current_time` was last known accurate
    pub last_update: Timestamp,
}

impl PlaybackState {
    pub fn new(is_playing: bool, current_time: f64, last_update: Timestamp) -> Self {
        Self {
            is_playing,
            current_time,
            last_update,
        }
    }

    /// State the server starts with: playing, near the beginning.
    pub fn initial(now: Timestamp) -> Self {
        Self::new(true, INITIAL_POSITION_SECONDS, now)
    }

    /// Estimated playback position at `now`.
    pub fn position_at(&self, now: Timestamp) -> f64 {
        if self.is_playing {
            self.current_time + self.last_update.seconds_until(now)
        } else {
            self.current_time
        }
    }

    /// A new state measured at `now`.
    ///
    /// Paused states are returned unchanged.
    pub fn extrapolated(&self, now: Timestamp) -> Self {
        if !self.is_playing {
            return *self;
        }
        Self::new(true, self.position_at(now), now)
    }
}
