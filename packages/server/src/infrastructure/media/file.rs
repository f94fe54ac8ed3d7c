//! File-backed media source.

use std::{
    io::{self, SeekFrom},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt},
};

use crate::domain::{MediaReader, MediaSource};

/// Serves byte ranges of a single file on disk.
///
/// The size is read from the filesystem on every request so a file replaced
/// while the server runs is picked up.
pub struct FileMediaSource {
    path: PathBuf,
    content_type: &'static str,
}

impl FileMediaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = content_type_for(&path);
        Self { path, content_type }
    }
}

#[async_trait]
impl MediaSource for FileMediaSource {
    async fn size(&self) -> io::Result<u64> {
        Ok(tokio::fs::metadata(&self.path).await?.len())
    }

    async fn open_range(&self, start: u64, length: u64) -> io::Result<MediaReader> {
        let mut file = File::open(&self.path).await?;
        file.seek(SeekFrom::Start(start)).await?;
        Ok(Box::new(file.take(length)))
    }

    fn content_type(&self) -> &'static str {
        self.content_type
    }
}

fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn write_temp_file(contents: &[u8], extension: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("watchparty-{}.{}", Uuid::new_v4(), extension));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_size_reports_file_length() {
        // テスト項目: ファイルサイズが取得できる
        // given (前提条件):
        let path = write_temp_file(b"0123456789", "mp4");
        let source = FileMediaSource::new(&path);

        // when (操作):
        let size = source.size().await.unwrap();

        // then (期待する結果):
        assert_eq!(size, 10);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_open_range_reads_only_requested_window() {
        // テスト項目: 指定した開始位置から指定した長さだけ読み出される
        // given (前提条件):
        let path = write_temp_file(b"0123456789", "mp4");
        let source = FileMediaSource::new(&path);

        // when (操作):
        let mut reader = source.open_range(3, 4).await.unwrap();
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();

        // then (期待する結果):
        assert_eq!(buf, b"3456");
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        // テスト項目: 存在しないファイルは I/O エラーになる
        // given (前提条件):
        let source = FileMediaSource::new(std::env::temp_dir().join("watchparty-missing.mp4"));

        // when (操作):
        let size = source.size().await;
        let reader = source.open_range(0, 1).await;

        // then (期待する結果):
        assert_eq!(size.unwrap_err().kind(), io::ErrorKind::NotFound);
        assert!(reader.is_err());
    }

    #[test]
    fn test_content_type_from_extension() {
        // テスト項目: 拡張子から Content-Type が決まる
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(FileMediaSource::new("a/filmeva.mp4").content_type(), "video/mp4");
        assert_eq!(FileMediaSource::new("a/clip.WEBM").content_type(), "video/webm");
        assert_eq!(FileMediaSource::new("a/clip.avi").content_type(), "video/x-msvideo");
        assert_eq!(FileMediaSource::new("a/clip.mpeg").content_type(), "video/mpeg");
        assert_eq!(FileMediaSource::new("a/clip.3gp").content_type(), "video/3gpp");
        assert_eq!(FileMediaSource::new("a/clip.flv").content_type(), "video/x-flv");
        assert_eq!(
            FileMediaSource::new("a/blob").content_type(),
            "application/octet-stream"
        );
    }
}
