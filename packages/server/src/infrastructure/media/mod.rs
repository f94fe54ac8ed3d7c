//! Media source implementations.

pub mod file;

pub use file::FileMediaSource;
