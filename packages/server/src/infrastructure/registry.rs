//! Connection registry: the single source of truth for "who is online".
//!
//! Tracks every live connection's outbound channel (spectators included)
//! and the `user → connection` presence mapping for identified users. All
//! state sits behind one mutex, so register/deregister/snapshot can never
//! observe each other half-applied.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PusherChannel, UserId};

struct RegistryInner {
    /// Every live connection's outbound channel, keyed by connection id.
    connections: HashMap<ConnectionId, PusherChannel>,
    /// At most one tracked connection per user; last connection wins.
    online: HashMap<UserId, ConnectionId>,
}

/// Bidirectional mapping of user identity to an active live connection.
///
/// Mutated only by the gateway's connect/disconnect handling; read by the
/// relay for delivery lookups and the presence broadcast.
pub struct ConnectionRegistry {
    inner: Mutex<RegistryInner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                connections: HashMap::new(),
                online: HashMap::new(),
            }),
        }
    }

    /// Track a live connection's outbound channel. Called for every
    /// accepted socket, identified or spectator.
    pub async fn attach(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut inner = self.inner.lock().await;
        inner.connections.insert(connection_id, channel);
    }

    /// Stop tracking a connection's outbound channel.
    pub async fn detach(&self, connection_id: &ConnectionId) {
        let mut inner = self.inner.lock().await;
        inner.connections.remove(connection_id);
    }

    /// Install or overwrite the presence mapping for a user. A new
    /// connection for the same user silently supersedes any prior one.
    pub async fn register(&self, user_id: UserId, connection_id: ConnectionId) {
        let mut inner = self.inner.lock().await;
        if let Some(previous) = inner.online.insert(user_id.clone(), connection_id) {
            tracing::debug!(
                "User '{}' reconnected, superseding connection {}",
                user_id,
                previous
            );
        }
    }

    /// Remove the presence mapping only if the stored connection id still
    /// equals `connection_id`. A stale disconnect callback arriving after a
    /// reconnect must not evict the newer connection. Returns whether the
    /// mapping was removed.
    pub async fn deregister(&self, user_id: &UserId, connection_id: &ConnectionId) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.online.get(user_id) {
            Some(current) if current == connection_id => {
                inner.online.remove(user_id);
                true
            }
            _ => false,
        }
    }

    /// Current connection id for a user, if online.
    pub async fn lookup(&self, user_id: &UserId) -> Option<ConnectionId> {
        let inner = self.inner.lock().await;
        inner.online.get(user_id).cloned()
    }

    /// Outbound channel for a user's live connection, if online.
    pub async fn channel_for(&self, user_id: &UserId) -> Option<PusherChannel> {
        let inner = self.inner.lock().await;
        let connection_id = inner.online.get(user_id)?;
        inner.connections.get(connection_id).cloned()
    }

    /// All currently online users, sorted for consistent broadcast order.
    pub async fn snapshot_online_users(&self) -> Vec<UserId> {
        let inner = self.inner.lock().await;
        let mut users: Vec<UserId> = inner.online.keys().cloned().collect();
        users.sort();
        users
    }

    /// Outbound channels of every live connection, spectators included.
    pub async fn all_channels(&self) -> Vec<PusherChannel> {
        let inner = self.inner.lock().await;
        inner.connections.values().cloned().collect()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
