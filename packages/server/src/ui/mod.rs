//! Watchparty server UI layer (axum routes and handlers).

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
