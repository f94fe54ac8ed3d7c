//! Process-wide server configuration.

use std::{path::PathBuf, time::Duration};

/// Default maximum number of concurrent viewers
pub const DEFAULT_MAX_CLIENTS: usize = 4;
/// Default chunk size served per range request, in MiB
pub const DEFAULT_CHUNK_SIZE_MB: u64 = 10;
pub const DEFAULT_PORT: u16 = 3000;
/// Default volume step pushed to viewers, in percent
pub const DEFAULT_VOLUME_STEP: u32 = 5;
pub const DEFAULT_SKIP_SECONDS: u32 = 10;
pub const DEFAULT_VIDEO_FILE_NAME: &str = "filmeva.mp4";
/// Interval of the per-connection drift extrapolation tick
pub const DEFAULT_DRIFT_TICK_INTERVAL: Duration = Duration::from_secs(5);

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Immutable configuration, set once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_clients: usize,
    pub chunk_size_bytes: u64,
    pub volume_step: u32,
    pub skip_seconds: u32,
    pub video_file_name: String,
    /// Directory served as static assets; the video lives in `<root>/videos/`
    pub static_root: PathBuf,
    pub drift_tick_interval: Duration,
}

impl ServerConfig {
    /// Convert a chunk size given in MiB to bytes
    pub fn chunk_size_from_mb(chunk_size_mb: u64) -> u64 {
        chunk_size_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Path of the shared video on disk
    pub fn video_path(&self) -> PathBuf {
        self.static_root.join("videos").join(&self.video_file_name)
    }

    /// URL path of the range endpoint for the shared video
    pub fn video_route(&self) -> String {
        format!("/videos/{}", self.video_file_name)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_clients: DEFAULT_MAX_CLIENTS,
            chunk_size_bytes: Self::chunk_size_from_mb(DEFAULT_CHUNK_SIZE_MB),
            volume_step: DEFAULT_VOLUME_STEP,
            skip_seconds: DEFAULT_SKIP_SECONDS,
            video_file_name: DEFAULT_VIDEO_FILE_NAME.to_string(),
            static_root: PathBuf::from("."),
            drift_tick_interval: DEFAULT_DRIFT_TICK_INTERVAL,
        }
    }
}
