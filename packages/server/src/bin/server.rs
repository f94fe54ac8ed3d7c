//! Shared-playback synchronization server.
//!
//! Keeps every connected viewer on the same play/pause/seek state and streams the
//! shared video in fixed-size chunks through HTTP range requests.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin watchparty-server
//! cargo run --bin watchparty-server -- 8 10 3000 5 10 filmeva.mp4 --root ./public
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use watchparty_server::{
    config::{
        DEFAULT_CHUNK_SIZE_MB, DEFAULT_DRIFT_TICK_INTERVAL, DEFAULT_MAX_CLIENTS, DEFAULT_PORT,
        DEFAULT_SKIP_SECONDS, DEFAULT_VIDEO_FILE_NAME, DEFAULT_VOLUME_STEP, ServerConfig,
    },
    domain::{PlaybackState, Timestamp},
    infrastructure::{
        media::FileMediaSource, message_pusher::WebSocketMessagePusher,
        repository::InMemoryPlaybackStateRepository,
    },
    ui::{Server, state::AppState},
    usecase::{
        ApplyControlUseCase, ConnectViewerUseCase, DisconnectViewerUseCase,
        ExtrapolateDriftUseCase, GetPlaybackStateUseCase, ServeRangeUseCase,
    },
};
use watchparty_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "watchparty-server")]
#[command(about = "Shared video playback server with synchronized controls", long_about = None)]
struct Args {
    /// Maximum number of concurrent viewers
    #[arg(default_value_t = DEFAULT_MAX_CLIENTS)]
    max_clients: usize,

    /// Chunk size served per range request, in MiB
    #[arg(default_value_t = DEFAULT_CHUNK_SIZE_MB, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size_mb: u64,

    /// Port number to bind the server to
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Volume step pushed to viewers, in percent
    #[arg(default_value_t = DEFAULT_VOLUME_STEP)]
    volume_step: u32,

    /// Seconds skipped by the viewers' forward/back controls
    #[arg(default_value_t = DEFAULT_SKIP_SECONDS)]
    skip_seconds: u32,

    /// File name of the shared video inside `<root>/videos/`
    #[arg(default_value = DEFAULT_VIDEO_FILE_NAME)]
    video_file_name: String,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Directory served as static assets
    #[arg(short = 'r', long, default_value = ".")]
    root: PathBuf,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_clients: args.max_clients,
            chunk_size_bytes: ServerConfig::chunk_size_from_mb(args.chunk_size_mb),
            volume_step: args.volume_step,
            skip_seconds: args.skip_seconds,
            video_file_name: args.video_file_name,
            static_root: args.root,
            drift_tick_interval: DEFAULT_DRIFT_TICK_INTERVAL,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());

    // The video must exist before any viewer connects
    let video_path = config.video_path();
    match tokio::fs::metadata(&video_path).await {
        Ok(metadata) if metadata.is_file() => {
            tracing::info!(
                "Serving '{}' ({} bytes) in chunks of {} bytes",
                video_path.display(),
                metadata.len(),
                config.chunk_size_bytes
            );
        }
        Ok(_) => {
            tracing::error!("'{}' is not a regular file", video_path.display());
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Cannot stat video '{}': {}", video_path.display(), e);
            std::process::exit(1);
        }
    }

    // Initialize dependencies in order:
    // 1. Repository / MessagePusher / MediaSource
    // 2. UseCases
    // 3. AppState
    // 4. Server

    // 1. Infrastructure
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository = Arc::new(InMemoryPlaybackStateRepository::new(PlaybackState::initial(
        Timestamp::new(clock.now_millis()),
    )));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let media = Arc::new(FileMediaSource::new(video_path));

    // 2. UseCases
    let app_state = AppState {
        connect_viewer_usecase: Arc::new(ConnectViewerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            config.max_clients,
            config.volume_step,
            config.skip_seconds,
        )),
        disconnect_viewer_usecase: Arc::new(DisconnectViewerUseCase::new(message_pusher.clone())),
        apply_control_usecase: Arc::new(ApplyControlUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        extrapolate_drift_usecase: Arc::new(ExtrapolateDriftUseCase::new(
            repository.clone(),
            clock.clone(),
        )),
        serve_range_usecase: Arc::new(ServeRangeUseCase::new(media, config.chunk_size_bytes)),
        get_playback_state_usecase: Arc::new(GetPlaybackStateUseCase::new(
            repository,
            message_pusher,
            clock,
        )),
        drift_tick_interval: config.drift_tick_interval,
    };

    // 3. Create and run the server
    tracing::info!(
        "Accepting up to {} viewers (volume step {}%, skip {}s)",
        config.max_clients,
        config.volume_step,
        config.skip_seconds
    );
    let server = Server::new(app_state, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
