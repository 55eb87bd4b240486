//! UI layer: axum router, HTTP and WebSocket handlers, shutdown signal.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
