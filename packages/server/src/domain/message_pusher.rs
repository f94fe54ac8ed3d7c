//! MessagePusher trait 定義
//!
//! 接続中の視聴者へ通知を送るためのインターフェース。
//! WebSocket の具体的な扱いは Infrastructure 層と UI 層が担当します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{notification::Notification, value_object::ConnectionId};

/// 各接続へ通知を流し込むチャンネル
pub type PusherChannel = mpsc::UnboundedSender<Notification>;

/// MessagePusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントを登録解除（チャンネルは閉じられる）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 複数のクライアントに送信
    ///
    /// ベストエフォート: 未登録・受信側クローズのクライアントはスキップし、
    /// 他のクライアントへの送信を妨げない。
    async fn broadcast(&self, targets: Vec<ConnectionId>, notification: Notification);

    /// 登録中の全てのクライアント ID を取得
    async fn connected_client_ids(&self) -> Vec<ConnectionId>;

    /// 登録中のクライアント数を取得
    async fn count_connected_clients(&self) -> usize;
}
