//! WebSocket implementation of the event relay.
//!
//! Pure delivery layer: looks targets up in the connection registry and
//! pushes serialized events into their outbound channels. No persistence,
//! no queuing, no retry. An offline target is a silent drop; the persisted
//! record is the durable truth a client re-fetches on reconnect.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{EventRelay, UserId};
use crate::infrastructure::dto::websocket::OnlineUsersChangedEvent;
use crate::infrastructure::registry::ConnectionRegistry;

/// Event relay delivering over the registry's WebSocket channels.
pub struct WebSocketRelay {
    registry: Arc<ConnectionRegistry>,
}

impl WebSocketRelay {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl EventRelay for WebSocketRelay {
    async fn notify(&self, target: &UserId, payload: &str) {
        match self.registry.channel_for(target).await {
            Some(channel) => {
                // A closed channel means the connection is tearing down;
                // same contract as an offline target.
                if channel.send(payload.to_string()).is_err() {
                    tracing::warn!("Dropped event for '{}': connection closing", target);
                } else {
                    tracing::debug!("Pushed event to '{}'", target);
                }
            }
            None => {
                tracing::debug!("User '{}' is offline, event dropped", target);
            }
        }
    }

    async fn broadcast_presence(&self) {
        let online_users = self.registry.snapshot_online_users().await;
        let payload = OnlineUsersChangedEvent::new(online_users).to_json();

        for channel in self.registry.all_channels().await {
            if channel.send(payload.clone()).is_err() {
                tracing::debug!("Skipped presence push to a closing connection");
            }
        }
    }
}
