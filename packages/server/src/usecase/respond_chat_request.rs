//! UseCase: respond to a pending chat request.
//!
//! Drives the `pending → accepted | rejected` transition. The decision is
//! validated before anything else, so a malformed decision can never touch
//! a stored record. Terminal states are immutable: responding to an
//! already-resolved pair reports `NotFound`, same as an absent one.

use std::sync::Arc;

use crate::domain::{ChatRequest, ChatRequestStore, Decision, EventRelay, PairKey, StoreError, UserId};

use super::error::RespondChatRequestError;

/// Resolves a pending chat request and notifies the original sender if
/// online.
pub struct RespondChatRequestUseCase {
    requests: Arc<dyn ChatRequestStore>,
    relay: Arc<dyn EventRelay>,
}

impl RespondChatRequestUseCase {
    pub fn new(requests: Arc<dyn ChatRequestStore>, relay: Arc<dyn EventRelay>) -> Self {
        Self { requests, relay }
    }

    /// Execute the response.
    ///
    /// # Arguments
    ///
    /// * `responder` - the identity answering the request
    /// * `original_sender` - the identity that initiated the request
    /// * `decision` - raw wire decision, must be `"accepted"` or `"rejected"`
    /// * `notify_json` - serialized `chat-request-response` event, built at
    ///   the boundary, delivered best-effort after the status persists
    pub async fn execute(
        &self,
        responder: UserId,
        original_sender: UserId,
        decision: &str,
        notify_json: String,
    ) -> Result<ChatRequest, RespondChatRequestError> {
        let decision = Decision::parse(decision)
            .map_err(|_| RespondChatRequestError::InvalidDecision(decision.to_string()))?;

        let pair = PairKey::new(&original_sender, &responder);
        let request = self
            .requests
            .resolve_pending(&pair, decision.into_status())
            .await
            .map_err(|e| match e {
                StoreError::NotFound => RespondChatRequestError::NotFound,
                other => RespondChatRequestError::StoreUnavailable(other.to_string()),
            })?;

        // Best-effort; an offline sender discovers the outcome through the
        // status endpoint.
        self.relay.notify(&original_sender, &notify_json).await;

        Ok(request)
    }
}
