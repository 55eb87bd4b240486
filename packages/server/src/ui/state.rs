//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::domain::EventRelay;
use crate::infrastructure::registry::ConnectionRegistry;
use crate::usecase::{
    ListMessagesUseCase, RequestStatusUseCase, RespondChatRequestUseCase, SendChatRequestUseCase,
    SendDirectMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// Source of truth for live connections and presence
    pub registry: Arc<ConnectionRegistry>,
    /// Best-effort event delivery
    pub relay: Arc<dyn EventRelay>,
    /// Chat-request state machine operations
    pub send_chat_request_usecase: Arc<SendChatRequestUseCase>,
    pub respond_chat_request_usecase: Arc<RespondChatRequestUseCase>,
    pub request_status_usecase: Arc<RequestStatusUseCase>,
    /// Message persistence and history
    pub send_direct_message_usecase: Arc<SendDirectMessageUseCase>,
    pub list_messages_usecase: Arc<ListMessagesUseCase>,
}
