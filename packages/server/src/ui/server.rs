//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::ServerConfig;

use super::{
    handler::{get_playback_state, health_check, stream_video, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Watchparty server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, config);
/// server.run().await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `state` - UseCases shared by every handler
    /// * `config` - Immutable process-wide configuration
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the router
    ///
    /// Every path without a dedicated route falls through to the static root.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // 動画の range 配信
            .route(&self.config.video_route(), get(stream_video))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/state", get(get_playback_state))
            .fallback_service(ServeDir::new(&self.config.static_root))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to the configured host and port and run until a shutdown signal
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Run on an already bound listener until a shutdown signal
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();
        let local_addr = listener.local_addr()?;

        tracing::info!("Watchparty server listening on http://{}", local_addr);
        tracing::info!("Video: http://{}{}", local_addr, self.config.video_route());
        tracing::info!("Sync channel: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
