//! Event relay trait definition.
//!
//! The relay is the only component that touches live connections. Delivery
//! is at-most-once and best-effort: an offline target is a silent drop, not
//! an error, which is why neither method returns a `Result`. Callers that
//! need guaranteed delivery rely on the persisted record instead.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::user::UserId;

/// Outbound channel to one connection's push loop.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Real-time event delivery to connected clients.
#[async_trait]
pub trait EventRelay: Send + Sync {
    /// Push a serialized event to the target user's live connection, if
    /// any. A target without a live connection is skipped silently.
    async fn notify(&self, target: &UserId, payload: &str);

    /// Push the current online-user snapshot to every live connection,
    /// spectators included.
    async fn broadcast_presence(&self);
}
