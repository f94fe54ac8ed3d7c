//! UseCase: 再生位置のドリフト補正
//!
//! 再生中は操作イベントの間も `current_time` が古くならないよう、
//! 接続ごとのタイマーで経過時間を足し込みます。既存の視聴者へのブロードキャストは行わず、
//! 新しく参加する視聴者の初期 sync と次の操作の基準だけに影響します。

use std::{future::Future, sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use watchparty_shared::time::Clock;

use crate::domain::{PlaybackState, PlaybackStateRepository, Timestamp};

/// ドリフト補正のユースケース
pub struct ExtrapolateDriftUseCase {
    /// Repository（共有再生状態）
    repository: Arc<dyn PlaybackStateRepository>,
    clock: Arc<dyn Clock>,
}

impl ExtrapolateDriftUseCase {
    /// 新しい ExtrapolateDriftUseCase を作成
    pub fn new(repository: Arc<dyn PlaybackStateRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 1 回分の補正を実行
    ///
    /// # Returns
    ///
    /// * `Some(PlaybackState)` - 補正後の状態
    /// * `None` - 一時停止中、または読み取り後に操作イベントが割り込んだため何もしなかった
    pub async fn execute(&self) -> Option<PlaybackState> {
        let current = self.repository.get().await;
        if !current.is_playing {
            return None;
        }

        let next = current.extrapolated(Timestamp::new(self.clock.now_millis()));
        if self.repository.replace_if(&current, next).await {
            tracing::trace!("Extrapolated playback position to {:.3}s", next.current_time);
            Some(next)
        } else {
            tracing::debug!("Playback state changed during extrapolation, skipping tick");
            None
        }
    }
}

/// 接続ごとの周期タイマー
///
/// 接続が所有し、drop されるとタスクが abort されるため、
/// 切断後にティックが実行されることはない。
#[derive(Debug)]
pub struct DriftTimer {
    handle: JoinHandle<()>,
}

impl DriftTimer {
    /// `period` ごとにドリフト補正を実行するタイマーを開始
    pub fn start(usecase: Arc<ExtrapolateDriftUseCase>, period: Duration) -> Self {
        Self::spawn(period, move || {
            let usecase = usecase.clone();
            async move {
                usecase.execute().await;
            }
        })
    }

    /// `period` ごとに `on_tick` を実行するタイマーを開始（最初のティックは `period` 後）
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                on_tick().await;
            }
        });
        Self { handle }
    }

    /// タイマーを停止（以降 tick は実行されない）
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for DriftTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryPlaybackStateRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use watchparty_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ExtrapolateDriftUseCase::execute() の補正計算
    // - DriftTimer の周期実行と drop によるキャンセル
    //
    // 【なぜこのテストが必要か】
    // - 途中参加者が受け取る sync の再生位置が古くならないことを保証
    // - 切断した接続のタイマーだけが止まり、他の接続のタイマーは動き続けることを確認
    // ========================================

    const T: i64 = 1_700_000_000_000;

    fn create_usecase(
        initial: PlaybackState,
        now: i64,
    ) -> (ExtrapolateDriftUseCase, Arc<InMemoryPlaybackStateRepository>) {
        let repository = Arc::new(InMemoryPlaybackStateRepository::new(initial));
        let usecase =
            ExtrapolateDriftUseCase::new(repository.clone(), Arc::new(FixedClock::new(now)));
        (usecase, repository)
    }

    #[tokio::test]
    async fn test_tick_advances_position_while_playing() {
        // テスト項目: 再生中、5 秒後のティックで再生位置が 10 → 15 になる
        // given (前提条件):
        let initial = PlaybackState::new(true, 10.0, Timestamp::new(T));
        let (usecase, repository) = create_usecase(initial, T + 5_000);

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        let stored = repository.get().await;
        assert_eq!(result, Some(stored));
        assert!((stored.current_time - 15.0).abs() < 1e-9);
        assert_eq!(stored.last_update, Timestamp::new(T + 5_000));
        assert!(stored.is_playing);
    }

    #[tokio::test]
    async fn test_tick_does_nothing_while_paused() {
        // テスト項目: 一時停止中はティックしても状態が変わらない
        // given (前提条件):
        let initial = PlaybackState::new(false, 10.0, Timestamp::new(T));
        let (usecase, repository) = create_usecase(initial, T + 5_000);

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(result, None);
        assert_eq!(repository.get().await, initial);
    }

    #[tokio::test]
    async fn test_repeated_ticks_do_not_double_count() {
        // テスト項目: 同じ時刻に複数の接続のティックが走っても経過時間は 1 回分だけ加算される
        // given (前提条件):
        let initial = PlaybackState::new(true, 10.0, Timestamp::new(T));
        let (usecase, repository) = create_usecase(initial, T + 5_000);

        // when (操作):
        usecase.execute().await;
        usecase.execute().await;

        // then (期待する結果):
        assert!((repository.get().await.current_time - 15.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_timer_ticks_periodically() {
        // テスト項目: タイマーが周期的に実行される
        // given (前提条件):
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        // when (操作):
        let timer = DriftTimer::spawn(Duration::from_millis(20), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::time::sleep(Duration::from_millis(110)).await;

        // then (期待する結果):
        assert!(count.load(Ordering::SeqCst) >= 2);
        timer.cancel();
    }

    #[tokio::test]
    async fn test_cancel_stops_ticking() {
        // テスト項目: cancel した後は tick が実行されない
        // given (前提条件):
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = DriftTimer::spawn(Duration::from_millis(20), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::time::sleep(Duration::from_millis(70)).await;

        // when (操作):
        timer.cancel();
        let at_cancel = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(80)).await;

        // then (期待する結果):
        assert!(at_cancel >= 1);
        assert_eq!(count.load(Ordering::SeqCst), at_cancel);
    }

    #[tokio::test]
    async fn test_dropping_one_timer_leaves_others_running() {
        // テスト項目: 切断した接続のタイマーだけが止まり、他のタイマーは動き続ける
        // given (前提条件):
        let count_a = Arc::new(AtomicUsize::new(0));
        let count_b = Arc::new(AtomicUsize::new(0));
        let (counter_a, counter_b) = (count_a.clone(), count_b.clone());
        let timer_a = DriftTimer::spawn(Duration::from_millis(20), move || {
            let counter = counter_a.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        let _timer_b = DriftTimer::spawn(Duration::from_millis(20), move || {
            let counter = counter_b.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::time::sleep(Duration::from_millis(70)).await;

        // when (操作):
        drop(timer_a);
        let a_at_cancel = count_a.load(Ordering::SeqCst);
        let b_at_cancel = count_b.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;

        // then (期待する結果):
        assert_eq!(count_a.load(Ordering::SeqCst), a_at_cancel);
        assert!(count_b.load(Ordering::SeqCst) > b_at_cancel);
    }

    #[tokio::test]
    async fn test_timer_drives_extrapolation() {
        // テスト項目: DriftTimer::start がユースケースを周期実行する
        // given (前提条件):
        let initial = PlaybackState::new(true, 10.0, Timestamp::new(T));
        let (usecase, repository) = create_usecase(initial, T + 2_000);

        // when (操作):
        let timer = DriftTimer::start(Arc::new(usecase), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(timer);

        // then (期待する結果):
        let stored = repository.get().await;
        assert!((stored.current_time - 12.0).abs() < 1e-9);
        assert_eq!(stored.last_update, Timestamp::new(T + 2_000));
    }
}
