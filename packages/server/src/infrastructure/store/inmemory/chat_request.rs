//! In-memory chat-request store.
//!
//! Implements the domain's `ChatRequestStore` trait over a mutex-guarded
//! map keyed by unordered pair. Holding the mutex across the existence
//! check and the insert is what makes `insert` a single logical operation:
//! two racing sends for the same pair can never both succeed.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatRequest, ChatRequestStore, PairKey, RequestStatus, StoreError};

/// In-memory chat-request store implementation.
pub struct InMemoryChatRequestStore {
    records: Mutex<HashMap<PairKey, ChatRequest>>,
}

impl InMemoryChatRequestStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryChatRequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRequestStore for InMemoryChatRequestStore {
    async fn find_by_pair(&self, pair: &PairKey) -> Result<Option<ChatRequest>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.get(pair).cloned())
    }

    async fn insert(&self, request: ChatRequest) -> Result<ChatRequest, StoreError> {
        let mut records = self.records.lock().await;
        let pair = request.pair();
        if records.contains_key(&pair) {
            return Err(StoreError::Duplicate);
        }
        records.insert(pair, request.clone());
        Ok(request)
    }

    async fn resolve_pending(
        &self,
        pair: &PairKey,
        status: RequestStatus,
    ) -> Result<ChatRequest, StoreError> {
        let mut records = self.records.lock().await;
        match records.get_mut(pair) {
            Some(record) if record.is_pending() => {
                record.status = status;
                Ok(record.clone())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use std::sync::Arc;

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn request(sender: &str, receiver: &str) -> ChatRequest {
        ChatRequest::new(user(sender), user(receiver), 1000)
    }

    #[tokio::test]
    async fn test_insert_then_find_by_pair() {
        // given:
        let store = InMemoryChatRequestStore::new();

        // when:
        store.insert(request("alice", "bob")).await.unwrap();

        // then: found regardless of lookup direction
        let pair = PairKey::new(&user("bob"), &user("alice"));
        let found = store.find_by_pair(&pair).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().sender, user("alice"));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_pair() {
        // given:
        let store = InMemoryChatRequestStore::new();
        store.insert(request("alice", "bob")).await.unwrap();

        // when: the reverse direction is the same pair
        let result = store.insert(request("bob", "alice")).await;

        // then:
        assert_eq!(result, Err(StoreError::Duplicate));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_produce_exactly_one_record() {
        // given:
        let store = Arc::new(InMemoryChatRequestStore::new());

        // when: two sends for the same pair race on separate tasks
        let store_a = store.clone();
        let store_b = store.clone();
        let (first, second) = tokio::join!(
            tokio::spawn(async move { store_a.insert(request("alice", "bob")).await }),
            tokio::spawn(async move { store_b.insert(request("bob", "alice")).await }),
        );
        let results = [first.unwrap(), second.unwrap()];

        // then: exactly one winner, the loser observes Duplicate
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results.contains(&Err(StoreError::Duplicate)));

        let pair = PairKey::new(&user("alice"), &user("bob"));
        assert!(store.find_by_pair(&pair).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resolve_pending_moves_to_terminal_status() {
        // given:
        let store = InMemoryChatRequestStore::new();
        store.insert(request("alice", "bob")).await.unwrap();
        let pair = PairKey::new(&user("alice"), &user("bob"));

        // when:
        let resolved = store
            .resolve_pending(&pair, RequestStatus::Accepted)
            .await
            .unwrap();

        // then:
        assert_eq!(resolved.status, RequestStatus::Accepted);
        assert_eq!(resolved.sender, user("alice"));
    }

    #[tokio::test]
    async fn test_resolve_pending_fails_for_absent_pair() {
        // given:
        let store = InMemoryChatRequestStore::new();
        let pair = PairKey::new(&user("alice"), &user("bob"));

        // when:
        let result = store.resolve_pending(&pair, RequestStatus::Rejected).await;

        // then:
        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_resolved_record_cannot_be_resolved_again() {
        // given:
        let store = InMemoryChatRequestStore::new();
        store.insert(request("alice", "bob")).await.unwrap();
        let pair = PairKey::new(&user("alice"), &user("bob"));
        store
            .resolve_pending(&pair, RequestStatus::Rejected)
            .await
            .unwrap();

        // when: a second respond arrives for the now-terminal record
        let result = store.resolve_pending(&pair, RequestStatus::Accepted).await;

        // then: terminal states are immutable
        assert_eq!(result, Err(StoreError::NotFound));
        let record = store.find_by_pair(&pair).await.unwrap().unwrap();
        assert_eq!(record.status, RequestStatus::Rejected);
    }
}
