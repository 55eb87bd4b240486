//! UseCase layer: one struct per operation, with store and relay
//! collaborators injected behind their domain traits.

mod error;
mod list_messages;
mod request_status;
mod respond_chat_request;
mod send_chat_request;
mod send_direct_message;

pub use error::{
    ListMessagesError, RequestStatusError, RespondChatRequestError, SendChatRequestError,
    SendMessageError,
};
pub use list_messages::ListMessagesUseCase;
pub use request_status::{RequestStatusUseCase, RequestStatusView};
pub use respond_chat_request::RespondChatRequestUseCase;
pub use send_chat_request::SendChatRequestUseCase;
pub use send_direct_message::SendDirectMessageUseCase;
