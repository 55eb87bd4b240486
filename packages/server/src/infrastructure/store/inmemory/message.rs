//! In-memory message store.
//!
//! Per-pair append-only history behind a mutex. Append order is insertion
//! order, which is what gives a single sender per-pair FIFO once relaying
//! waits for persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DirectMessage, MessageStore, PairKey, StoreError};

/// In-memory message store implementation.
pub struct InMemoryMessageStore {
    messages: Mutex<HashMap<PairKey, Vec<DirectMessage>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: DirectMessage) -> Result<DirectMessage, StoreError> {
        let mut messages = self.messages.lock().await;
        messages
            .entry(message.pair())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn list_by_pair(&self, pair: &PairKey) -> Result<Vec<DirectMessage>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages.get(pair).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageBody, UserId};

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn message(sender: &str, receiver: &str, text: &str, at: i64) -> DirectMessage {
        DirectMessage::new(
            user(sender),
            user(receiver),
            MessageBody::new(Some(text.to_string()), None).unwrap(),
            at,
        )
    }

    #[tokio::test]
    async fn test_list_by_pair_returns_insertion_order() {
        // given: messages in both directions for one pair
        let store = InMemoryMessageStore::new();
        store.insert(message("alice", "bob", "hi", 1)).await.unwrap();
        store
            .insert(message("bob", "alice", "hello", 2))
            .await
            .unwrap();
        store
            .insert(message("alice", "bob", "how are you", 3))
            .await
            .unwrap();

        // when:
        let pair = PairKey::new(&user("bob"), &user("alice"));
        let history = store.list_by_pair(&pair).await.unwrap();

        // then: one interleaved history in insertion order
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].body.text(), Some("hi"));
        assert_eq!(history[1].body.text(), Some("hello"));
        assert_eq!(history[2].body.text(), Some("how are you"));
    }

    #[tokio::test]
    async fn test_pairs_are_isolated() {
        // given:
        let store = InMemoryMessageStore::new();
        store.insert(message("alice", "bob", "hi", 1)).await.unwrap();

        // when:
        let other_pair = PairKey::new(&user("alice"), &user("charlie"));
        let history = store.list_by_pair(&other_pair).await.unwrap();

        // then:
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_list_for_unknown_pair_is_empty() {
        // given:
        let store = InMemoryMessageStore::new();

        // when:
        let pair = PairKey::new(&user("nobody"), &user("noone"));

        // then:
        assert!(store.list_by_pair(&pair).await.unwrap().is_empty());
    }
}
