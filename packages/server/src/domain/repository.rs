//! Store trait definitions.
//!
//! The domain layer owns the interfaces it needs from persistence; concrete
//! implementations live in the infrastructure layer (dependency inversion).
//! Both stores are narrow CRUD surfaces: the chat-request store additionally
//! guarantees pair uniqueness at insert time, which is what closes the
//! concurrent duplicate-send race.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::chat_request::{ChatRequest, PairKey, RequestStatus};
use super::error::StoreError;
use super::message::DirectMessage;

/// Durable persistence of chat-request records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatRequestStore: Send + Sync {
    /// Look up the record for an unordered pair, if any.
    async fn find_by_pair(&self, pair: &PairKey) -> Result<Option<ChatRequest>, StoreError>;

    /// Insert a new record, failing with [`StoreError::Duplicate`] if any
    /// record already exists for the pair. Check and insert are one
    /// serialized operation: two concurrent inserts for the same pair
    /// produce exactly one record.
    async fn insert(&self, request: ChatRequest) -> Result<ChatRequest, StoreError>;

    /// Atomically move the pair's record from pending to the given terminal
    /// status, returning the updated record. Fails with
    /// [`StoreError::NotFound`] when no pending record exists for the pair.
    async fn resolve_pending(
        &self,
        pair: &PairKey,
        status: RequestStatus,
    ) -> Result<ChatRequest, StoreError>;
}

/// Durable persistence of direct messages.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message. Messages are immutable once inserted.
    async fn insert(&self, message: DirectMessage) -> Result<DirectMessage, StoreError>;

    /// All messages for an unordered pair, in insertion order.
    async fn list_by_pair(&self, pair: &PairKey) -> Result<Vec<DirectMessage>, StoreError>;
}
