//! UseCase: 視聴者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectViewerUseCase::execute() メソッド
//! - 接続数の上限チェックと初期メッセージ（config → sync）の送信
//!
//! ### なぜこのテストが必要か
//! - 新しい視聴者は必ず config を 1 回、続けて sync を 1 回受け取る必要がある
//! - 上限超過時は error のみを受け取り、登録されないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規視聴者の接続
//! - 異常系：接続数の上限超過
//! - エッジケース：受信側がすでに閉じている

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PlaybackState, PlaybackStateRepository,
    PusherChannel,
};

use super::error::ConnectError;

/// 視聴者接続のユースケース
pub struct ConnectViewerUseCase {
    /// Repository（共有再生状態）
    repository: Arc<dyn PlaybackStateRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    max_clients: usize,
    volume_step: u32,
    skip_seconds: u32,
}

impl ConnectViewerUseCase {
    /// 新しい ConnectViewerUseCase を作成
    pub fn new(
        repository: Arc<dyn PlaybackStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        max_clients: usize,
        volume_step: u32,
        skip_seconds: u32,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            max_clients,
            volume_step,
            skip_seconds,
        }
    }

    /// 視聴者接続を実行
    ///
    /// 上限チェックと登録はアトミックではないため、同時接続が集中した場合は
    /// 一時的に上限をわずかに超えることがある。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続 ID
    /// * `sender` - この接続への通知チャンネル（拒否された場合は error 送信後に破棄される）
    ///
    /// # Returns
    ///
    /// * `Ok(PlaybackState)` - 接続成功（送信した sync の状態）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<PlaybackState, ConnectError> {
        // 1. 上限チェック
        let active = self.message_pusher.count_connected_clients().await;
        if active >= self.max_clients {
            let message = format!(
                "Too many viewers: this session allows at most {}",
                self.max_clients
            );
            if sender.send(Notification::Rejected(message)).is_err() {
                tracing::debug!("Rejected viewer '{}' already went away", connection_id);
            }
            return Err(ConnectError::CapacityExceeded {
                max_clients: self.max_clients,
            });
        }

        // 2. config → sync の順で初期メッセージを送信
        let snapshot = self.repository.get().await;
        sender
            .send(Notification::Config {
                volume_step: self.volume_step,
                skip_seconds: self.skip_seconds,
            })
            .map_err(|_| ConnectError::ChannelClosed)?;
        sender
            .send(Notification::Sync(snapshot))
            .map_err(|_| ConnectError::ChannelClosed)?;

        // 3. MessagePusher に登録（以降ブロードキャスト対象になる）
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        Ok(snapshot)
    }
}
