//! Domain errors.

use thiserror::Error;

/// Range header errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The request carries no `Range` header
    #[error("Range header is required")]
    Missing,

    /// The header could not be parsed as `bytes=<start>-[end]`
    #[error("Malformed Range header: '{0}'")]
    Malformed(String),

    /// `start` lies at or beyond the end of the media
    #[error("Range start {start} is beyond media size {size}")]
    NotSatisfiable { start: u64, size: u64 },
}
