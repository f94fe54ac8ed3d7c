//! Shared utilities for the Watchparty workspace.

pub mod logger;
pub mod time;
