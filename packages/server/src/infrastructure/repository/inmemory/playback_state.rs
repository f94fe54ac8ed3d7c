//! InMemory PlaybackState Repository 実装
//!
//! ドメイン層が定義する PlaybackStateRepository trait の具体的な実装。
//! プロセスの生存期間中だけ状態を保持し、永続化は行いません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PlaybackState, PlaybackStateRepository};

/// インメモリ PlaybackState Repository 実装
///
/// 3 つのフィールドを 1 つの単位として Mutex で保護するため、
/// 読み取り側が書き込み途中の状態を観測することはない。
pub struct InMemoryPlaybackStateRepository {
    state: Mutex<PlaybackState>,
}

impl InMemoryPlaybackStateRepository {
    /// 初期状態を指定して作成
    pub fn new(initial: PlaybackState) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }
}

#[async_trait]
impl PlaybackStateRepository for InMemoryPlaybackStateRepository {
    async fn get(&self) -> PlaybackState {
        *self.state.lock().await
    }

    async fn replace(&self, new_state: PlaybackState) {
        let mut state = self.state.lock().await;
        *state = new_state;
    }

    async fn replace_if(&self, expected: &PlaybackState, new_state: PlaybackState) -> bool {
        let mut state = self.state.lock().await;
        if *state != *expected {
            return false;
        }
        *state = new_state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use std::sync::Arc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryPlaybackStateRepository の get / replace / replace_if
    //
    // 【なぜこのテストが必要か】
    // - 全ての接続とタイマーが共有する唯一の状態であり、
    //   last-write-wins で丸ごと置き換えられることを保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 初期状態の取得
    // 2. 連続した置き換えの後は最後の値が残る
    // 3. replace_if は期待値と一致する場合のみ置き換える
    // 4. 並行した置き換えでも状態が壊れない
    // ========================================

    fn state(is_playing: bool, current_time: f64, last_update: i64) -> PlaybackState {
        PlaybackState::new(is_playing, current_time, Timestamp::new(last_update))
    }

    #[tokio::test]
    async fn test_get_returns_initial_state() {
        // テスト項目: 作成直後は初期状態が返される
        // given (前提条件):
        let initial = PlaybackState::initial(Timestamp::new(1_000));
        let repository = InMemoryPlaybackStateRepository::new(initial);

        // when (操作):
        let result = repository.get().await;

        // then (期待する結果):
        assert_eq!(result, initial);
    }

    #[tokio::test]
    async fn test_last_replace_wins() {
        // テスト項目: 連続した置き換えの後は最後に置き換えた値と等しい
        // given (前提条件):
        let repository = InMemoryPlaybackStateRepository::new(state(true, 1.0, 0));
        let events = [
            state(false, 12.5, 100),
            state(true, 40.0, 200),
            state(false, 3.0, 300),
        ];

        // when (操作):
        for event in events {
            repository.replace(event).await;
        }

        // then (期待する結果):
        assert_eq!(repository.get().await, state(false, 3.0, 300));
    }

    #[tokio::test]
    async fn test_replace_if_matches() {
        // テスト項目: 期待値と一致する場合は置き換えられる
        // given (前提条件):
        let current = state(true, 10.0, 0);
        let repository = InMemoryPlaybackStateRepository::new(current);

        // when (操作):
        let replaced = repository.replace_if(&current, state(true, 15.0, 5_000)).await;

        // then (期待する結果):
        assert!(replaced);
        assert_eq!(repository.get().await, state(true, 15.0, 5_000));
    }

    #[tokio::test]
    async fn test_replace_if_skips_when_changed() {
        // テスト項目: 読み取り後に別の更新が入った場合は置き換えない
        // given (前提条件):
        let stale = state(true, 10.0, 0);
        let repository = InMemoryPlaybackStateRepository::new(stale);
        repository.replace(state(false, 99.0, 1_000)).await;

        // when (操作):
        let replaced = repository.replace_if(&stale, state(true, 15.0, 5_000)).await;

        // then (期待する結果):
        assert!(!replaced);
        assert_eq!(repository.get().await, state(false, 99.0, 1_000));
    }

    #[tokio::test]
    async fn test_concurrent_replaces_never_mix_fields() {
        // テスト項目: 並行した置き換え後も、いずれかの書き込み値がそのまま残る
        // given (前提条件):
        let repository = Arc::new(InMemoryPlaybackStateRepository::new(state(true, 0.0, 0)));
        let writes: Vec<PlaybackState> = (0..32)
            .map(|i| state(i % 2 == 0, i as f64, i as i64 * 10))
            .collect();

        // when (操作):
        let mut handles = Vec::new();
        for write in writes.clone() {
            let repository = repository.clone();
            handles.push(tokio::spawn(async move { repository.replace(write).await }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let result = repository.get().await;
        assert!(writes.contains(&result));
    }
}
