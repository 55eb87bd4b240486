//! WebSocket connection handlers: the gateway.
//!
//! Owns the connection lifecycle. On connect: attach the outbound channel,
//! register the claimed identity (if any), broadcast presence. On close:
//! detach, deregister (guarded against reconnect races), broadcast presence
//! exactly once, after both per-connection tasks have stopped. Inbound
//! application events are routed to the usecases; failures come back on the
//! caller's own connection as an `error` event.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::domain::{ConnectionId, MessageBody, PusherChannel, UserId};
use crate::infrastructure::dto::websocket::{
    ChatRequestReceivedEvent, ChatRequestResponseEvent, ClientEvent, ErrorEvent, MessageBodyDto,
    MessageReceivedEvent,
};
use crate::ui::state::AppState;
use crate::usecase::{RespondChatRequestError, SendChatRequestError};

/// Query parameters for WebSocket connection. A missing `user_id` is a
/// legal spectator connection: attached, never registered, presence
/// broadcasts only.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> UserId (Domain Model) before the upgrade so a
    // malformed identity is rejected with a plain HTTP status.
    let identity = match query.user_id {
        Some(raw) => match UserId::new(raw.clone()) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                tracing::warn!("Invalid user_id '{}': {}", raw, e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        None => None,
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events for this client
/// (pushed by the relay via the registry channel) are sent to this client's
/// WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Option<UserId>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = ConnectionId::generate();

    // Attach before broadcasting so the fresh connection receives the
    // presence snapshot that includes it.
    state
        .registry
        .attach(connection_id.clone(), tx.clone())
        .await;
    if let Some(user_id) = &identity {
        state
            .registry
            .register(user_id.clone(), connection_id.clone())
            .await;
        tracing::info!("User '{}' connected as {}", user_id, connection_id);
    } else {
        tracing::info!("Spectator connected as {}", connection_id);
    }
    state.relay.broadcast_presence().await;

    let state_clone = state.clone();
    let caller_identity = identity.clone();
    let reply_tx = tx.clone();

    // Spawn a task to receive events from this client and route them
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Failed to parse client event: {}", e);
                            reply(
                                &reply_tx,
                                ErrorEvent::new("validation-error", format!("bad event: {e}")),
                            );
                            continue;
                        }
                    };

                    // Targeted events require a registered identity.
                    let caller = match &caller_identity {
                        Some(caller) => caller.clone(),
                        None => {
                            tracing::warn!("Spectator attempted a targeted event");
                            reply(
                                &reply_tx,
                                ErrorEvent::new(
                                    "validation-error",
                                    "spectator connections cannot send events",
                                ),
                            );
                            continue;
                        }
                    };

                    route_client_event(&state_clone, &reply_tx, caller, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client requested close");
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive events for this client and send them out
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Disconnect cleanup runs once, after both tasks have stopped. The
    // presence broadcast fires only when the online set actually changed.
    state.registry.detach(&connection_id).await;
    if let Some(user_id) = &identity {
        if state.registry.deregister(user_id, &connection_id).await {
            tracing::info!("User '{}' disconnected ({})", user_id, connection_id);
            state.relay.broadcast_presence().await;
        } else {
            // A newer connection superseded this one; presence for this
            // user is unchanged.
            tracing::debug!(
                "Stale disconnect for '{}' ({}), newer connection active",
                user_id,
                connection_id
            );
        }
    } else {
        tracing::info!("Spectator disconnected ({})", connection_id);
    }
}

/// Push an error event back to the caller's own connection.
fn reply(reply_tx: &PusherChannel, event: ErrorEvent) {
    if reply_tx.send(event.to_json()).is_err() {
        tracing::debug!("Caller connection closing, error reply dropped");
    }
}

async fn route_client_event(
    state: &Arc<AppState>,
    reply_tx: &PusherChannel,
    caller: UserId,
    event: ClientEvent,
) {
    match event {
        ClientEvent::ChatRequestSent { to_user_id } => {
            let receiver = match UserId::new(to_user_id) {
                Ok(receiver) => receiver,
                Err(e) => {
                    reply(reply_tx, ErrorEvent::new("validation-error", e.to_string()));
                    return;
                }
            };

            let notify_json = ChatRequestReceivedEvent::new(&caller).to_json();
            match state
                .send_chat_request_usecase
                .execute(caller.clone(), receiver.clone(), notify_json)
                .await
            {
                Ok(_) => {
                    tracing::info!("Chat request '{}' -> '{}' created", caller, receiver);
                }
                Err(e) => {
                    tracing::warn!("Chat request '{}' -> '{}' failed: {}", caller, receiver, e);
                    reply(reply_tx, ErrorEvent::new(send_error_kind(&e), e.to_string()));
                }
            }
        }
        ClientEvent::ChatRequestResponded {
            to_user_id,
            response,
        } => {
            let original_sender = match UserId::new(to_user_id) {
                Ok(sender) => sender,
                Err(e) => {
                    reply(reply_tx, ErrorEvent::new("validation-error", e.to_string()));
                    return;
                }
            };

            let notify_json = ChatRequestResponseEvent::new(&caller, &response).to_json();
            match state
                .respond_chat_request_usecase
                .execute(
                    caller.clone(),
                    original_sender.clone(),
                    &response,
                    notify_json,
                )
                .await
            {
                Ok(request) => {
                    tracing::info!(
                        "Chat request '{}' -> '{}' resolved: {}",
                        original_sender,
                        caller,
                        request.status.as_str()
                    );
                }
                Err(e) => {
                    tracing::warn!("Respond by '{}' failed: {}", caller, e);
                    reply(
                        reply_tx,
                        ErrorEvent::new(respond_error_kind(&e), e.to_string()),
                    );
                }
            }
        }
        ClientEvent::SendMessage {
            to_user_id,
            message,
        } => {
            let receiver = match UserId::new(to_user_id) {
                Ok(receiver) => receiver,
                Err(e) => {
                    reply(reply_tx, ErrorEvent::new("validation-error", e.to_string()));
                    return;
                }
            };
            let MessageBodyDto { text, image } = message;
            let body = match MessageBody::new(text, image) {
                Ok(body) => body,
                Err(e) => {
                    reply(reply_tx, ErrorEvent::new("validation-error", e.to_string()));
                    return;
                }
            };

            // Persist first; the relay push is best-effort and never fails
            // the send.
            match state
                .send_direct_message_usecase
                .execute(caller.clone(), receiver.clone(), body)
                .await
            {
                Ok(persisted) => {
                    let payload = MessageReceivedEvent::new(&persisted).to_json();
                    state.relay.notify(&receiver, &payload).await;
                    tracing::debug!(
                        "Message '{}' -> '{}' persisted and relayed",
                        caller,
                        receiver
                    );
                }
                Err(e) => {
                    tracing::warn!("Message '{}' -> '{}' failed: {}", caller, receiver, e);
                    reply(
                        reply_tx,
                        ErrorEvent::new("store-unavailable", e.to_string()),
                    );
                }
            }
        }
    }
}

fn send_error_kind(err: &SendChatRequestError) -> &'static str {
    match err {
        SendChatRequestError::SelfRequest => "validation-error",
        SendChatRequestError::Duplicate => "duplicate-request",
        SendChatRequestError::StoreUnavailable(_) => "store-unavailable",
    }
}

fn respond_error_kind(err: &RespondChatRequestError) -> &'static str {
    match err {
        RespondChatRequestError::InvalidDecision(_) => "invalid-decision",
        RespondChatRequestError::NotFound => "not-found",
        RespondChatRequestError::StoreUnavailable(_) => "store-unavailable",
    }
}
