//! UseCase: list the message history between two users.
//!
//! The durable counterpart to the best-effort relay: a client that was
//! offline when events were dropped re-fetches the truth here.

use std::sync::Arc;

use crate::domain::{DirectMessage, MessageStore, PairKey, UserId};

use super::error::ListMessagesError;

/// Returns a pair's messages in insertion order.
pub struct ListMessagesUseCase {
    messages: Arc<dyn MessageStore>,
}

impl ListMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self {
        Self { messages }
    }

    pub async fn execute(
        &self,
        user_a: UserId,
        user_b: UserId,
    ) -> Result<Vec<DirectMessage>, ListMessagesError> {
        let pair = PairKey::new(&user_a, &user_b);
        self.messages
            .list_by_pair(&pair)
            .await
            .map_err(|e| ListMessagesError::StoreUnavailable(e.to_string()))
    }
}
