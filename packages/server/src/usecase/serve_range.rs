//! UseCase: 動画の range 配信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ServeRangeUseCase::execute() メソッド
//! - Range ヘッダーの検証、チャンクの計算、バックエンドのエラー処理
//!
//! ### なぜこのテストが必要か
//! - クライアントが要求した範囲に関わらず、常に 1 チャンク分だけを返すことを保証
//! - 400 / 416 / 500 に対応するエラーが正しく区別されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：先頭・途中・末尾からのリクエスト
//! - 異常系：Range ヘッダーなし、ファイル末尾以降、I/O エラー

use std::{fmt, sync::Arc};

use crate::domain::{ByteRange, MediaReader, MediaSource, RangeError, parse_range_start};

use super::error::ServeRangeError;

/// 1 回の range リクエストで返すチャンク
pub struct RangeChunk {
    pub range: ByteRange,
    pub content_type: &'static str,
    /// `range` の範囲だけを読み出すリーダー
    pub body: MediaReader,
}

impl fmt::Debug for RangeChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeChunk")
            .field("range", &self.range)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Range 配信のユースケース
pub struct ServeRangeUseCase {
    media: Arc<dyn MediaSource>,
    chunk_size_bytes: u64,
}

impl ServeRangeUseCase {
    /// 新しい ServeRangeUseCase を作成
    pub fn new(media: Arc<dyn MediaSource>, chunk_size_bytes: u64) -> Self {
        Self {
            media,
            chunk_size_bytes,
        }
    }

    /// Range リクエストを処理
    ///
    /// # Arguments
    ///
    /// * `range_header` - `Range` ヘッダーの値（なければ `None`）
    ///
    /// # Returns
    ///
    /// * `Ok(RangeChunk)` - 206 で返すチャンク
    /// * `Err(ServeRangeError)` - 400 / 416 / 500 に対応するエラー
    pub async fn execute(&self, range_header: Option<&str>) -> Result<RangeChunk, ServeRangeError> {
        let header = range_header.ok_or(RangeError::Missing)?;
        let start = parse_range_start(header)?;

        let size = self.media.size().await?;
        let range = ByteRange::resolve(start, self.chunk_size_bytes, size)?;

        let body = self
            .media
            .open_range(range.start, range.content_length())
            .await?;

        Ok(RangeChunk {
            range,
            content_type: self.media.content_type(),
            body,
        })
    }
}
