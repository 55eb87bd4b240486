//! User identity and connection identity value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// Maximum accepted length for a user id, in characters.
const MAX_USER_ID_LEN: usize = 64;

/// Opaque, stable identifier for a registered user.
///
/// Identity is owned by the auth subsystem; the core only validates the
/// shape (non-empty, no surrounding whitespace, bounded length) and treats
/// the value as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a validated user id.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        if value.trim() != value {
            return Err(DomainError::UntrimmedUserId(value));
        }
        if value.chars().count() > MAX_USER_ID_LEN {
            return Err(DomainError::UserIdTooLong(MAX_USER_ID_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for one physical connection.
///
/// A fresh id is generated per accepted socket, so two connections from the
/// same user are always distinguishable (the guarded deregister relies on
/// this).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_accepts_plain_identifier() {
        // when:
        let result = UserId::new("alice");

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_user_id_rejects_empty_string() {
        // when / then:
        assert_eq!(UserId::new(""), Err(DomainError::EmptyUserId));
        assert_eq!(UserId::new("   "), Err(DomainError::EmptyUserId));
    }

    #[test]
    fn test_user_id_rejects_surrounding_whitespace() {
        // when:
        let result = UserId::new(" alice ");

        // then:
        assert!(matches!(result, Err(DomainError::UntrimmedUserId(_))));
    }

    #[test]
    fn test_user_id_rejects_overlong_value() {
        // given:
        let long = "a".repeat(65);

        // when / then:
        assert_eq!(UserId::new(long), Err(DomainError::UserIdTooLong(64)));
        assert!(UserId::new("a".repeat(64)).is_ok());
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // when:
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then:
        assert_ne!(first, second);
    }
}
