//! UseCase: 再生状態の取得（デバッグ用）

use std::sync::Arc;

use watchparty_shared::time::Clock;

use crate::domain::{MessagePusher, PlaybackState, PlaybackStateRepository, Timestamp};

/// 再生状態のスナップショット
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    /// 取得時点まで外挿した再生位置
    pub estimated_position: f64,
    pub connected_viewers: usize,
}

/// 再生状態取得のユースケース
pub struct GetPlaybackStateUseCase {
    repository: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl GetPlaybackStateUseCase {
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

    pub async fn execute(&self) -> PlaybackSnapshot {
        let state = self.repository.get().await;
        let now = Timestamp::new(self.clock.now_millis());
        PlaybackSnapshot {
            state,
            estimated_position: state.position_at(now),
            connected_viewers: self.message_pusher.count_connected_clients().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPlaybackStateRepository,
    };
    use watchparty_shared::time::FixedClock;

    #[tokio::test]
    async fn test_snapshot_extrapolates_position() {
        // テスト項目: スナップショットは保存値と外挿した再生位置を返す
        // given (前提条件):
        let state = PlaybackState::new(true, 10.0, Timestamp::new(1_000));
        let usecase = GetPlaybackStateUseCase::new(
            Arc::new(InMemoryPlaybackStateRepository::new(state)),
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(FixedClock::new(4_000)),
        );

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(snapshot.state, state);
        assert!((snapshot.estimated_position - 13.0).abs() < 1e-9);
        assert_eq!(snapshot.connected_viewers, 0);
    }
}
