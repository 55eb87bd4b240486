//! Infrastructure layer: connection registry, in-memory stores, the
//! WebSocket relay, and wire DTOs.

pub mod dto;
pub mod registry;
pub mod relay;
pub mod store;
