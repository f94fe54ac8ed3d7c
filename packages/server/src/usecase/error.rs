//! UseCase 層のエラー型

use std::io;

use thiserror::Error;

use crate::domain::RangeError;

/// 視聴者接続時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 接続数が上限に達している
    #[error("Viewer capacity exceeded (max {max_clients})")]
    CapacityExceeded { max_clients: usize },

    /// 初期メッセージを送る前にクライアントのチャンネルが閉じた
    #[error("Viewer channel closed before the initial state was sent")]
    ChannelClosed,
}

/// 視聴者切断時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Viewer '{0}' is not connected")]
    NotConnected(String),
}

/// Range 配信時のエラー
#[derive(Debug, Error)]
pub enum ServeRangeError {
    /// クライアント起因（400 / 416）
    #[error(transparent)]
    Range(#[from] RangeError),

    /// バックエンドファイルの I/O エラー（500）
    #[error("Media I/O error: {0}")]
    Io(#[from] io::Error),
}
