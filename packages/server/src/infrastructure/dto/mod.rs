//! Data Transfer Objects (DTO)
//!
//! Wire formats used by the WebSocket and HTTP endpoints.

pub mod conversion;
pub mod http;
pub mod websocket;
