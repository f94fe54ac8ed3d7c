//! Shared-playback synchronization server library.
//!
//! Viewers connected over WebSocket share a single play/pause/seek state,
//! while the video itself is delivered through HTTP range requests.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
