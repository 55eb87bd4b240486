//! Event relay implementations.

pub mod websocket;

pub use websocket::WebSocketRelay;
