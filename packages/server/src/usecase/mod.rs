//! UseCase 層
//!
//! 同期プロトコル（接続・操作・切断・ドリフト補正）と
//! 動画の range 配信のユースケースを提供します。

mod apply_control;
mod connect_viewer;
mod disconnect_viewer;
mod error;
mod extrapolate_drift;
mod get_playback_state;
mod serve_range;

pub use apply_control::ApplyControlUseCase;
pub use connect_viewer::ConnectViewerUseCase;
pub use disconnect_viewer::DisconnectViewerUseCase;
pub use error::{ConnectError, DisconnectError, ServeRangeError};
pub use extrapolate_drift::{DriftTimer, ExtrapolateDriftUseCase};
pub use get_playback_state::{GetPlaybackStateUseCase, PlaybackSnapshot};
pub use serve_range::{RangeChunk, ServeRangeUseCase};
