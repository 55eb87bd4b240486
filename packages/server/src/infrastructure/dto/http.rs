//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::RequestStatus;

/// Body of `POST /api/chat-requests/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendChatRequestBody {
    pub sender: String,
    pub receiver: String,
}

/// Body of `POST /api/chat-requests/respond`. `sender`/`receiver` name the
/// original request direction; the responder is the receiver.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondChatRequestBody {
    pub sender: String,
    pub receiver: String,
    pub response: String,
}

/// Body of `POST /api/chat-requests/status`. `sender` is the querying
/// identity, used to resolve `isSender`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestStatusBody {
    pub sender: String,
    pub receiver: String,
}

/// Response of the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusResponse {
    pub status: Option<String>,
    pub is_sender: bool,
}

impl RequestStatusResponse {
    pub fn new(status: Option<RequestStatus>, is_sender: bool) -> Self {
        Self {
            status: status.map(|s| s.as_str().to_string()),
            is_sender,
        }
    }
}

/// Simple acknowledgment body for mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

/// Error body: `{"error": {"kind": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                kind: kind.to_string(),
                message: message.into(),
            },
        }
    }
}
