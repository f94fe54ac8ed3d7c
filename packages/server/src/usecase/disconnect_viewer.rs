//! UseCase: 視聴者切断処理
//!
//! 切断時は MessagePusher から登録を解除するだけで、他の視聴者への通知は行いません。
//! ドリフト補正タイマーは接続側が所有しており、この処理の前に停止されます。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::error::DisconnectError;

/// 視聴者切断のユースケース
pub struct DisconnectViewerUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectViewerUseCase {
    /// 新しい DisconnectViewerUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 視聴者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 残りの視聴者数
    /// * `Err(DisconnectError)` - 登録されていない接続
    pub async fn execute(&self, connection_id: ConnectionId) -> Result<usize, DisconnectError> {
        let connected = self.message_pusher.connected_client_ids().await;
        if !connected.contains(&connection_id) {
            return Err(DisconnectError::NotConnected(connection_id.to_string()));
        }

        self.message_pusher.unregister_client(&connection_id).await;

        Ok(self.message_pusher.count_connected_clients().await)
    }
}
