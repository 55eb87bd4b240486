//! Presence and direct-message relay server for Tsunagi.
//!
//! Tracks which users currently hold a live connection, gates direct
//! conversations behind a mutual chat-request handshake, and relays
//! real-time events (presence changes, request notifications, message
//! pushes) to connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
