//! Media byte source and range arithmetic.

use std::{io, num::IntErrorKind};

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::RangeError;

/// Reader positioned at the start of a requested range and limited to its length
pub type MediaReader = Box<dyn AsyncRead + Send + Unpin>;

/// A seekable byte source backing the video endpoint.
///
/// Every call to `open_range` yields an independent cursor, so concurrent
/// requests never share read state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Total size of the media in bytes
    async fn size(&self) -> io::Result<u64>;

    /// Open a reader over `length` bytes starting at `start`
    async fn open_range(&self, start: u64, length: u64) -> io::Result<MediaReader>;

    /// MIME type sent as `Content-Type`
    fn content_type(&self) -> &'static str;
}

/// Inclusive byte window served for one range request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ByteRange {
    /// Compute the chunk served for a request starting at `start`.
    ///
    /// The window is always `chunk_size` bytes (clipped at EOF), whatever end
    /// offset the client asked for.
    pub fn resolve(start: u64, chunk_size: u64, total: u64) -> Result<Self, RangeError> {
        if start >= total {
            return Err(RangeError::NotSatisfiable { start, size: total });
        }
        let end = start
            .saturating_add(chunk_size.max(1) - 1)
            .min(total - 1);
        Ok(Self { start, end, total })
    }

    pub fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value of the `Content-Range` header for a 206 response
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Value of the `Content-Range` header for a 416 response
pub fn unsatisfied_content_range(total: u64) -> String {
    format!("bytes */{}", total)
}

/// Extract the start offset from a `Range: bytes=<start>-[end]` header.
///
/// Only the first range of a multi-range header is considered and the end
/// offset is ignored. A start too large for `u64` saturates to `u64::MAX`, so it
/// is rejected later as beyond the end of the media.
pub fn parse_range_start(header: &str) -> Result<u64, RangeError> {
    let malformed = || RangeError::Malformed(header.to_string());

    let ranges = header.trim().strip_prefix("bytes=").ok_or_else(malformed)?;
    let first = ranges.split(',').next().unwrap_or_default();
    let start = match first.split_once('-') {
        Some((start, _end)) => start,
        None => first,
    };
    match start.trim().parse::<u64>() {
        Ok(start) => Ok(start),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        Err(_) => Err(malformed()),
    }
}
