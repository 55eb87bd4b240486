//! Domain layer: value objects, entities, and the interfaces the core
//! requires from its collaborators (stores and the event relay).

mod chat_request;
mod error;
mod message;
mod relay;
mod repository;
mod user;

pub use chat_request::{ChatRequest, Decision, PairKey, RequestStatus};
pub use error::{DomainError, StoreError};
pub use message::{DirectMessage, MessageBody};
pub use relay::{EventRelay, PusherChannel};
pub use repository::{ChatRequestStore, MessageStore};
pub use user::{ConnectionId, UserId};

#[cfg(test)]
pub use repository::{MockChatRequestStore, MockMessageStore};
