//! Request handlers.

mod http;
mod media;
mod websocket;

pub use http::{get_playback_state, health_check};
pub use media::stream_video;
pub use websocket::websocket_handler;
