//! Shared utilities for the Tsunagi chat system.
//!
//! Hosts the pieces every binary needs regardless of role: logging setup
//! and time handling.

pub mod logger;
pub mod time;
