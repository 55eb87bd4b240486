//! Store implementations.

pub mod inmemory;

pub use inmemory::{InMemoryChatRequestStore, InMemoryMessageStore};
