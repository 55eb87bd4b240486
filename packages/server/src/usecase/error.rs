//! UseCase error types.

use thiserror::Error;

/// Errors from sending a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendChatRequestError {
    /// A user cannot request a conversation with themselves
    #[error("sender and receiver must differ")]
    SelfRequest,

    /// A record already exists for the pair, in any state
    #[error("a chat request already exists for this pair")]
    Duplicate,

    /// Persistence failure; transient, caller must re-issue
    #[error("chat request store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors from responding to a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RespondChatRequestError {
    /// Decision outside {accepted, rejected}; the store is never touched
    #[error("invalid decision '{0}': expected 'accepted' or 'rejected'")]
    InvalidDecision(String),

    /// No pending record exists for the pair
    #[error("no pending chat request for this pair")]
    NotFound,

    /// Persistence failure; transient, caller must re-issue
    #[error("chat request store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors from querying a pair's request status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestStatusError {
    /// Persistence failure; transient, caller must re-issue
    #[error("chat request store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors from persisting a direct message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// Persistence failure; transient, caller must re-issue
    #[error("message store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors from listing a pair's message history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListMessagesError {
    /// Persistence failure; transient, caller must re-issue
    #[error("message store unavailable: {0}")]
    StoreUnavailable(String),
}
