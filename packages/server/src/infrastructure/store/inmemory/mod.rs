//! In-memory store implementations backing the domain store traits.

mod chat_request;
mod message;

pub use chat_request::InMemoryChatRequestStore;
pub use message::InMemoryMessageStore;
