//! UseCase: persist a direct message.
//!
//! Persistence always precedes relaying: the gateway pushes the
//! `message-received` event only after this usecase returns, so a message
//! exists durably even when delivery is dropped. Relay failure can never
//! fail the send.

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::domain::{DirectMessage, MessageBody, MessageStore, UserId};

use super::error::SendMessageError;

/// Persists a direct message for later relay and history.
pub struct SendDirectMessageUseCase {
    messages: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl SendDirectMessageUseCase {
    pub fn new(messages: Arc<dyn MessageStore>, clock: Arc<dyn Clock>) -> Self {
        Self { messages, clock }
    }

    pub async fn execute(
        &self,
        sender: UserId,
        receiver: UserId,
        body: MessageBody,
    ) -> Result<DirectMessage, SendMessageError> {
        let message = DirectMessage::new(sender, receiver, body, self.clock.now_millis());
        self.messages
            .insert(message)
            .await
            .map_err(|e| SendMessageError::StoreUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockMessageStore, PairKey, StoreError};
    use crate::infrastructure::store::InMemoryMessageStore;
    use tsunagi_shared::time::FixedClock;

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn body(text: &str) -> MessageBody {
        MessageBody::new(Some(text.to_string()), None).unwrap()
    }

    fn clock_at(millis: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock::new(millis))
    }

    #[tokio::test]
    async fn test_message_is_persisted_with_the_clock_timestamp() {
        // given:
        let store = Arc::new(InMemoryMessageStore::new());
        let usecase = SendDirectMessageUseCase::new(store.clone(), clock_at(1700000000000));

        // when:
        let message = usecase
            .execute(user("alice"), user("bob"), body("hi"))
            .await
            .unwrap();

        // then:
        assert_eq!(message.created_at, 1700000000000);
        let pair = PairKey::new(&user("alice"), &user("bob"));
        let history = store.list_by_pair(&pair).await.unwrap();
        assert_eq!(history, vec![message]);
    }

    #[tokio::test]
    async fn test_messages_persist_in_send_order() {
        // given:
        let store = Arc::new(InMemoryMessageStore::new());
        let usecase = SendDirectMessageUseCase::new(store.clone(), clock_at(1000));

        // when:
        usecase
            .execute(user("alice"), user("bob"), body("first"))
            .await
            .unwrap();
        usecase
            .execute(user("alice"), user("bob"), body("second"))
            .await
            .unwrap();

        // then:
        let pair = PairKey::new(&user("alice"), &user("bob"));
        let history = store.list_by_pair(&pair).await.unwrap();
        assert_eq!(history[0].body.text(), Some("first"));
        assert_eq!(history[1].body.text(), Some("second"));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_unavailable() {
        // given:
        let mut store = MockMessageStore::new();
        store
            .expect_insert()
            .returning(|_| Err(StoreError::Unavailable("disk full".to_string())));
        let usecase = SendDirectMessageUseCase::new(Arc::new(store), clock_at(1000));

        // when:
        let result = usecase.execute(user("alice"), user("bob"), body("hi")).await;

        // then:
        assert!(matches!(result, Err(SendMessageError::StoreUnavailable(_))));
    }
}
