//! Server state shared by all handlers.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    ApplyControlUseCase, ConnectViewerUseCase, DisconnectViewerUseCase, ExtrapolateDriftUseCase,
    GetPlaybackStateUseCase, ServeRangeUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectViewerUseCase（視聴者接続のユースケース）
    pub connect_viewer_usecase: Arc<ConnectViewerUseCase>,
    /// DisconnectViewerUseCase（視聴者切断のユースケース）
    pub disconnect_viewer_usecase: Arc<DisconnectViewerUseCase>,
    /// ApplyControlUseCase（再生操作のユースケース）
    pub apply_control_usecase: Arc<ApplyControlUseCase>,
    /// ExtrapolateDriftUseCase（ドリフト補正のユースケース）
    pub extrapolate_drift_usecase: Arc<ExtrapolateDriftUseCase>,
    /// ServeRangeUseCase（動画 range 配信のユースケース）
    pub serve_range_usecase: Arc<ServeRangeUseCase>,
    /// GetPlaybackStateUseCase（再生状態取得のユースケース）
    pub get_playback_state_usecase: Arc<GetPlaybackStateUseCase>,
    /// Period of each connection's drift timer
    pub drift_tick_interval: Duration,
}
