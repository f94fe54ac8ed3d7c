//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel` を管理
//! - 視聴者への通知のブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成と JSON へのシリアライズは UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `PusherChannel` を受け取り、通知の配送だけを担当します。
//! チャンネルは unbounded なので、遅いクライアントが他のクライアントへの配送を止めることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePusher, Notification, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id, tx).await;
/// pusher.broadcast(vec![connection_id], Notification::Sync(state)).await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの sender
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, notification: Notification) {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(notification.clone()) {
                    tracing::warn!("Failed to push notification to client '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted notification to client '{}'", target);
                }
            } else {
                tracing::warn!("Client '{}' not found during broadcast, skipping", target);
            }
        }
    }

    async fn connected_client_ids(&self) -> Vec<ConnectionId> {
        let clients = self.clients.lock().await;
        clients.keys().copied().collect()
    }

    async fn count_connected_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}
