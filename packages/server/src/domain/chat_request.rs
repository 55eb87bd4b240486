//! Chat-request entity and the state machine vocabulary around it.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::user::UserId;

/// Lifecycle status of a chat request.
///
/// `Pending` is the only state with outgoing transitions; `Accepted` and
/// `Rejected` are terminal for the lifetime of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// A receiver's answer to a pending chat request.
///
/// Parsed strictly from the wire values `"accepted"` and `"rejected"`;
/// anything else is an invalid decision and must never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    /// Parse a wire decision string.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "accepted" => Ok(Decision::Accepted),
            "rejected" => Ok(Decision::Rejected),
            other => Err(DomainError::InvalidDecision(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Rejected => "rejected",
        }
    }

    /// The terminal status this decision resolves a pending request to.
    pub fn into_status(self) -> RequestStatus {
        match self {
            Decision::Accepted => RequestStatus::Accepted,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Canonical key for the unordered pair of users in a conversation.
///
/// Both `(a, b)` and `(b, a)` normalize to the same key, so at most one
/// chat-request record and one message history can exist per pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey(UserId, UserId);

impl PairKey {
    pub fn new(a: &UserId, b: &UserId) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }
}

/// A pending or resolved permission to converse.
///
/// The record is directional (it remembers who initiated), but lookup is by
/// unordered pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub sender: UserId,
    pub receiver: UserId,
    pub status: RequestStatus,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl ChatRequest {
    /// Create a new pending request from `sender` to `receiver`.
    pub fn new(sender: UserId, receiver: UserId, created_at: i64) -> Self {
        Self {
            sender,
            receiver,
            status: RequestStatus::Pending,
            created_at,
        }
    }

    pub fn pair(&self) -> PairKey {
        PairKey::new(&self.sender, &self.receiver)
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    #[test]
    fn test_pair_key_is_direction_independent() {
        // given:
        let alice = user("alice");
        let bob = user("bob");

        // when / then:
        assert_eq!(PairKey::new(&alice, &bob), PairKey::new(&bob, &alice));
    }

    #[test]
    fn test_pair_keys_differ_for_different_pairs() {
        // given:
        let alice = user("alice");
        let bob = user("bob");
        let charlie = user("charlie");

        // when / then:
        assert_ne!(PairKey::new(&alice, &bob), PairKey::new(&alice, &charlie));
    }

    #[test]
    fn test_new_request_starts_pending() {
        // when:
        let request = ChatRequest::new(user("alice"), user("bob"), 1000);

        // then:
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.is_pending());
        assert_eq!(request.pair(), PairKey::new(&user("bob"), &user("alice")));
    }

    #[test]
    fn test_decision_parses_wire_values() {
        // when / then:
        assert_eq!(Decision::parse("accepted"), Ok(Decision::Accepted));
        assert_eq!(Decision::parse("rejected"), Ok(Decision::Rejected));
    }

    #[test]
    fn test_decision_rejects_anything_else() {
        // when / then:
        assert!(matches!(
            Decision::parse("maybe"),
            Err(DomainError::InvalidDecision(_))
        ));
        assert!(matches!(
            Decision::parse("Accepted"),
            Err(DomainError::InvalidDecision(_))
        ));
        assert!(matches!(
            Decision::parse(""),
            Err(DomainError::InvalidDecision(_))
        ));
    }

    #[test]
    fn test_decision_resolves_to_terminal_status() {
        // when / then:
        assert_eq!(Decision::Accepted.into_status(), RequestStatus::Accepted);
        assert_eq!(Decision::Rejected.into_status(), RequestStatus::Rejected);
    }
}
