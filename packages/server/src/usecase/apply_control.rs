//! UseCase: 再生操作（play / pause / seek）の適用
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ApplyControlUseCase::execute() メソッド
//! - 共有状態の置き換えと、送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 最後に処理された操作が共有状態になる（last-write-wins）ことを保証
//! - N 人接続中は N-1 人にだけ sync が届き、送信者には届かないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：操作の適用とブロードキャスト
//! - エッジケース：送信者のみが接続している（ブロードキャスト対象なし）
//! - エッジケース：負の再生位置（検証せずに受け入れる）

use std::sync::Arc;

use watchparty_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PlaybackState, PlaybackStateRepository, Timestamp,
};

/// 再生操作適用のユースケース
pub struct ApplyControlUseCase {
    /// Repository（共有再生状態）
    repository: Arc<dyn PlaybackStateRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ApplyControlUseCase {
    /// 新しい ApplyControlUseCase を作成
    pub fn new(
        repository: Arc<dyn PlaybackStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 再生操作を適用
    ///
    /// # Arguments
    ///
    /// * `from` - 操作した視聴者の接続 ID
    /// * `is_playing` - 再生中かどうか
    /// * `current_time` - 視聴者側の再生位置（秒、検証しない）
    ///
    /// # Returns
    ///
    /// ブロードキャスト対象の接続 ID リスト。閉じかけの視聴者への送信失敗は
    /// 他の視聴者への配送を止めない。
    pub async fn execute(
        &self,
        from: ConnectionId,
        is_playing: bool,
        current_time: f64,
    ) -> Vec<ConnectionId> {
        // 1. 状態を丸ごと置き換え
        let new_state = PlaybackState::new(
            is_playing,
            current_time,
            Timestamp::new(self.clock.now_millis()),
        );
        self.repository.replace(new_state).await;

        // 2. ブロードキャスト対象を取得（送信者以外の全ての視聴者）
        let targets = self.get_broadcast_targets(&from).await;

        // 3. 置き換え直後のスナップショットをブロードキャスト
        self.message_pusher
            .broadcast(targets.clone(), Notification::Sync(new_state))
            .await;

        targets
    }

    async fn get_broadcast_targets(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.message_pusher
            .connected_client_ids()
            .await
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }
}
