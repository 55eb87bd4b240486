//! Direct-message entity.

use serde::{Deserialize, Serialize};

use super::chat_request::PairKey;
use super::error::DomainError;
use super::user::UserId;

/// Payload of a direct message: free text, an image (transported as a
/// data-URL string), or both. An entirely empty body is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    text: Option<String>,
    image: Option<String>,
}

impl MessageBody {
    /// Create a message body, rejecting one with neither text nor image.
    pub fn new(text: Option<String>, image: Option<String>) -> Result<Self, DomainError> {
        let text = text.filter(|t| !t.is_empty());
        let image = image.filter(|i| !i.is_empty());
        if text.is_none() && image.is_none() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self { text, image })
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// A persisted direct message. Immutable once created; the store owns it
/// from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectMessage {
    pub sender: UserId,
    pub receiver: UserId,
    pub body: MessageBody,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl DirectMessage {
    pub fn new(sender: UserId, receiver: UserId, body: MessageBody, created_at: i64) -> Self {
        Self {
            sender,
            receiver,
            body,
            created_at,
        }
    }

    pub fn pair(&self) -> PairKey {
        PairKey::new(&self.sender, &self.receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    #[test]
    fn test_body_with_text_only() {
        // when:
        let body = MessageBody::new(Some("hi".to_string()), None).unwrap();

        // then:
        assert_eq!(body.text(), Some("hi"));
        assert_eq!(body.image(), None);
    }

    #[test]
    fn test_body_with_image_only() {
        // when:
        let body = MessageBody::new(None, Some("data:image/png;base64,AAAA".to_string())).unwrap();

        // then:
        assert_eq!(body.text(), None);
        assert!(body.image().is_some());
    }

    #[test]
    fn test_empty_body_is_rejected() {
        // when / then:
        assert_eq!(MessageBody::new(None, None), Err(DomainError::EmptyMessage));
        assert_eq!(
            MessageBody::new(Some(String::new()), Some(String::new())),
            Err(DomainError::EmptyMessage)
        );
    }

    #[test]
    fn test_message_pair_matches_either_direction() {
        // given:
        let body = MessageBody::new(Some("hi".to_string()), None).unwrap();

        // when:
        let message = DirectMessage::new(user("alice"), user("bob"), body, 1000);

        // then:
        assert_eq!(message.pair(), PairKey::new(&user("bob"), &user("alice")));
    }
}
