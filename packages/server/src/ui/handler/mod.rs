//! Request handlers, split by protocol.

pub mod http;
pub mod websocket;
