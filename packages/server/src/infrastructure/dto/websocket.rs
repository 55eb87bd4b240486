//! WebSocket event DTOs.
//!
//! Every frame is JSON with a kebab-case `type` tag. Outbound events each
//! get their own struct with a `to_json` helper; inbound events parse into
//! one tagged enum so the gateway can route on the variant.

use serde::{Deserialize, Serialize};

use crate::domain::{DirectMessage, UserId};

/// Outbound event kinds pushed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    OnlineUsersChanged,
    ChatRequestReceived,
    ChatRequestResponse,
    MessageReceived,
    Error,
}

/// Presence broadcast: the full online-user snapshot, sent to every live
/// connection after each register/deregister.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUsersChangedEvent {
    pub r#type: EventType,
    pub online_users: Vec<String>,
}

impl OnlineUsersChangedEvent {
    pub fn new(online_users: Vec<UserId>) -> Self {
        Self {
            r#type: EventType::OnlineUsersChanged,
            online_users: online_users.into_iter().map(String::from).collect(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("event serializes")
    }
}

/// Pushed to the receiver of a freshly sent chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequestReceivedEvent {
    pub r#type: EventType,
    pub from_user_id: String,
}

impl ChatRequestReceivedEvent {
    pub fn new(sender: &UserId) -> Self {
        Self {
            r#type: EventType::ChatRequestReceived,
            from_user_id: sender.as_str().to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("event serializes")
    }
}

/// Pushed to the original sender once the receiver has decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequestResponseEvent {
    pub r#type: EventType,
    pub from_user_id: String,
    pub response: String,
}

impl ChatRequestResponseEvent {
    pub fn new(responder: &UserId, response: &str) -> Self {
        Self {
            r#type: EventType::ChatRequestResponse,
            from_user_id: responder.as_str().to_string(),
            response: response.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("event serializes")
    }
}

/// Wire form of a persisted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub sender: String,
    pub receiver: String,
    pub text: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
}

impl From<&DirectMessage> for MessageDto {
    fn from(message: &DirectMessage) -> Self {
        Self {
            sender: message.sender.as_str().to_string(),
            receiver: message.receiver.as_str().to_string(),
            text: message.body.text().map(str::to_string),
            image: message.body.image().map(str::to_string),
            created_at: message.created_at,
        }
    }
}

/// Pushed to the recipient of a persisted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReceivedEvent {
    pub r#type: EventType,
    pub message: MessageDto,
}

impl MessageReceivedEvent {
    pub fn new(message: &DirectMessage) -> Self {
        Self {
            r#type: EventType::MessageReceived,
            message: MessageDto::from(message),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("event serializes")
    }
}

/// Pushed back to the caller's own connection when an inbound event fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub r#type: EventType,
    pub kind: String,
    pub message: String,
}

impl ErrorEvent {
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            r#type: EventType::Error,
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("event serializes")
    }
}

/// Wire form of an inbound message body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBodyDto {
    pub text: Option<String>,
    pub image: Option<String>,
}

/// Inbound application-level events from a connected client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Caller asks to open a conversation with `to_user_id`.
    ChatRequestSent { to_user_id: String },
    /// Caller answers a pending request originally sent by `to_user_id`.
    ChatRequestResponded { to_user_id: String, response: String },
    /// Caller sends a direct message to `to_user_id`.
    SendMessage {
        to_user_id: String,
        message: MessageBodyDto,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_events_carry_kebab_case_tags() {
        // given:
        let alice = UserId::new("alice").unwrap();

        // when:
        let presence = OnlineUsersChangedEvent::new(vec![alice.clone()]).to_json();
        let received = ChatRequestReceivedEvent::new(&alice).to_json();
        let response = ChatRequestResponseEvent::new(&alice, "accepted").to_json();

        // then:
        assert!(presence.contains(r#""type":"online-users-changed""#));
        assert!(presence.contains(r#""online_users":["alice"]"#));
        assert!(received.contains(r#""type":"chat-request-received""#));
        assert!(response.contains(r#""response":"accepted""#));
    }

    #[test]
    fn test_inbound_events_parse_by_tag() {
        // when:
        let sent: ClientEvent =
            serde_json::from_str(r#"{"type":"chat-request-sent","to_user_id":"bob"}"#).unwrap();
        let responded: ClientEvent = serde_json::from_str(
            r#"{"type":"chat-request-responded","to_user_id":"alice","response":"accepted"}"#,
        )
        .unwrap();
        let message: ClientEvent = serde_json::from_str(
            r#"{"type":"send-message","to_user_id":"bob","message":{"text":"hi","image":null}}"#,
        )
        .unwrap();

        // then:
        assert!(matches!(sent, ClientEvent::ChatRequestSent { to_user_id } if to_user_id == "bob"));
        assert!(matches!(
            responded,
            ClientEvent::ChatRequestResponded { response, .. } if response == "accepted"
        ));
        assert!(matches!(
            message,
            ClientEvent::SendMessage { message, .. } if message.text.as_deref() == Some("hi")
        ));
    }

    #[test]
    fn test_unknown_inbound_tag_fails_to_parse() {
        // when:
        let result = serde_json::from_str::<ClientEvent>(r#"{"type":"shutdown"}"#);

        // then:
        assert!(result.is_err());
    }
}
