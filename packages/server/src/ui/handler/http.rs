//! HTTP API endpoint handlers.
//!
//! Thin adapters: validate the wire shape into domain values, call the
//! usecase, map its error to a status code and an
//! `{"error": {"kind", "message"}}` body.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, Path, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::{DomainError, UserId};
use crate::infrastructure::dto::http::{
    AckResponse, ErrorResponse, RequestStatusBody, RequestStatusResponse, RespondChatRequestBody,
    SendChatRequestBody,
};
use crate::infrastructure::dto::websocket::{
    ChatRequestReceivedEvent, ChatRequestResponseEvent, MessageDto,
};
use crate::ui::state::AppState;
use crate::usecase::{
    ListMessagesError, RequestStatusError, RespondChatRequestError, SendChatRequestError,
};

/// Error reply with the taxonomy kind and a human-readable message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    fn validation(err: DomainError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation-error", err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.kind, self.message);
        (self.status, Json(body)).into_response()
    }
}

/// `Json` extractor wrapper that reports malformed or incomplete bodies in
/// the API's error shape. The stock extractor rejects with 422 and a
/// plain-text body; a missing `sender` field must surface as a 400 carrying
/// the `{"error": {...}}` envelope like every other boundary failure.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "validation-error",
                rejection.body_text(),
            )),
        }
    }
}

impl From<SendChatRequestError> for ApiError {
    fn from(err: SendChatRequestError) -> Self {
        match &err {
            SendChatRequestError::SelfRequest => {
                Self::new(StatusCode::BAD_REQUEST, "validation-error", err.to_string())
            }
            SendChatRequestError::Duplicate => {
                Self::new(StatusCode::CONFLICT, "duplicate-request", err.to_string())
            }
            SendChatRequestError::StoreUnavailable(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "store-unavailable",
                err.to_string(),
            ),
        }
    }
}

impl From<RespondChatRequestError> for ApiError {
    fn from(err: RespondChatRequestError) -> Self {
        match &err {
            RespondChatRequestError::InvalidDecision(_) => {
                Self::new(StatusCode::BAD_REQUEST, "invalid-decision", err.to_string())
            }
            RespondChatRequestError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "not-found", err.to_string())
            }
            RespondChatRequestError::StoreUnavailable(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "store-unavailable",
                err.to_string(),
            ),
        }
    }
}

impl From<RequestStatusError> for ApiError {
    fn from(err: RequestStatusError) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "store-unavailable",
            err.to_string(),
        )
    }
}

impl From<ListMessagesError> for ApiError {
    fn from(err: ListMessagesError) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "store-unavailable",
            err.to_string(),
        )
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/chat-requests/send`
pub async fn send_chat_request(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<SendChatRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let sender = UserId::new(body.sender).map_err(ApiError::validation)?;
    let receiver = UserId::new(body.receiver).map_err(ApiError::validation)?;

    let notify_json = ChatRequestReceivedEvent::new(&sender).to_json();
    state
        .send_chat_request_usecase
        .execute(sender, receiver, notify_json)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AckResponse {
            message: "Chat request sent.".to_string(),
        }),
    ))
}

/// `POST /api/chat-requests/respond`
///
/// `sender`/`receiver` in the body name the original request direction;
/// the receiver is the one responding.
pub async fn respond_chat_request(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RespondChatRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let original_sender = UserId::new(body.sender).map_err(ApiError::validation)?;
    let responder = UserId::new(body.receiver).map_err(ApiError::validation)?;

    let notify_json = ChatRequestResponseEvent::new(&responder, &body.response).to_json();
    let request = state
        .respond_chat_request_usecase
        .execute(responder, original_sender, &body.response, notify_json)
        .await?;

    Ok(Json(AckResponse {
        message: format!("Request {}.", request.status.as_str()),
    }))
}

/// `POST /api/chat-requests/status`
pub async fn request_status(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RequestStatusBody>,
) -> Result<Json<RequestStatusResponse>, ApiError> {
    let caller = UserId::new(body.sender).map_err(ApiError::validation)?;
    let other = UserId::new(body.receiver).map_err(ApiError::validation)?;

    let view = state.request_status_usecase.execute(caller, other).await?;

    Ok(Json(RequestStatusResponse::new(view.status, view.is_sender)))
}

/// `GET /api/messages/{user_a}/{user_b}`
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path((user_a, user_b)): Path<(String, String)>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let user_a = UserId::new(user_a).map_err(ApiError::validation)?;
    let user_b = UserId::new(user_b).map_err(ApiError::validation)?;

    let messages = state.list_messages_usecase.execute(user_a, user_b).await?;

    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}
