//! Domain-level error types.

use thiserror::Error;

/// Validation failures for domain value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// User id was empty or whitespace-only
    #[error("user id must not be empty")]
    EmptyUserId,

    /// User id carried surrounding whitespace
    #[error("user id must not have surrounding whitespace: '{0}'")]
    UntrimmedUserId(String),

    /// User id exceeded the accepted length
    #[error("user id must be at most {0} characters")]
    UserIdTooLong(usize),

    /// Decision outside the accepted wire values
    #[error("invalid decision '{0}': expected 'accepted' or 'rejected'")]
    InvalidDecision(String),

    /// Message with neither text nor image payload
    #[error("message must carry text or an image")]
    EmptyMessage,
}

/// Failures surfaced by the persistence collaborators.
///
/// The in-memory stores only ever produce `Duplicate` and `NotFound`; a
/// durable backend maps its transport failures to `Unavailable`, which the
/// boundary reports as transient without retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record already exists for this pair
    #[error("record already exists for this pair")]
    Duplicate,

    /// No matching record
    #[error("no matching record")]
    NotFound,

    /// Persistence layer failure
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
