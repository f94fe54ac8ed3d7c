//! Repository trait 定義
//!
//! 共有再生状態（Session State Store）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::entity::PlaybackState;

/// PlaybackState Repository trait
///
/// 全ての操作は状態全体を単位とし、フィールド単位の部分更新は提供しない。
/// 読み取りと置き換えは互いに直列化される。
#[async_trait]
pub trait PlaybackStateRepository: Send + Sync {
    /// 現在の状態のスナップショットを取得
    async fn get(&self) -> PlaybackState;

    /// 状態を丸ごと置き換える（値の検証は行わない）
    async fn replace(&self, new_state: PlaybackState);

    /// 現在の状態が `expected` と等しい場合のみ置き換える
    ///
    /// 置き換えた場合は `true` を返す。読み取りから書き込みまでの間に
    /// 他の更新が入った場合は何もしない。
    async fn replace_if(&self, expected: &PlaybackState, new_state: PlaybackState) -> bool;
}
