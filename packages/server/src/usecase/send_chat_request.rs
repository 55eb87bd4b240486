//! UseCase: send a chat request.
//!
//! Drives the `absent → pending` transition of the pair's state machine.
//! Uniqueness is enforced by the store's serialized insert, so two racing
//! sends for the same pair resolve to one winner and one `Duplicate`.

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::domain::{ChatRequest, ChatRequestStore, EventRelay, StoreError, UserId};

use super::error::SendChatRequestError;

/// Sends a chat request and notifies the receiver if online.
pub struct SendChatRequestUseCase {
    requests: Arc<dyn ChatRequestStore>,
    relay: Arc<dyn EventRelay>,
    clock: Arc<dyn Clock>,
}

impl SendChatRequestUseCase {
    pub fn new(
        requests: Arc<dyn ChatRequestStore>,
        relay: Arc<dyn EventRelay>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            relay,
            clock,
        }
    }

    /// Execute the send.
    ///
    /// # Arguments
    ///
    /// * `sender` - the initiating identity
    /// * `receiver` - the identity being asked
    /// * `notify_json` - serialized `chat-request-received` event, built at
    ///   the boundary, delivered best-effort after the record persists
    pub async fn execute(
        &self,
        sender: UserId,
        receiver: UserId,
        notify_json: String,
    ) -> Result<ChatRequest, SendChatRequestError> {
        if sender == receiver {
            return Err(SendChatRequestError::SelfRequest);
        }

        let request = ChatRequest::new(sender, receiver.clone(), self.clock.now_millis());
        let request = self.requests.insert(request).await.map_err(|e| match e {
            StoreError::Duplicate => SendChatRequestError::Duplicate,
            other => SendChatRequestError::StoreUnavailable(other.to_string()),
        })?;

        // Delivery is best-effort; an offline receiver learns about the
        // request from the persisted record.
        self.relay.notify(&receiver, &notify_json).await;

        Ok(request)
    }
}
