//! Data Transfer Objects (DTOs) for the chat server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: real-time event DTOs (inbound client events, outbound pushes)
//! - `http`: HTTP API request/response DTOs

pub mod http;
pub mod websocket;
