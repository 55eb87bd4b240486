//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::domain::EventRelay;
use crate::infrastructure::registry::ConnectionRegistry;
use crate::usecase::{
    ListMessagesUseCase, RequestStatusUseCase, RespondChatRequestUseCase, SendChatRequestUseCase,
    SendDirectMessageUseCase,
};

use super::{
    handler::{
        http::{
            health_check, list_messages, request_status, respond_chat_request, send_chat_request,
        },
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat gateway server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     registry,
///     relay,
///     send_chat_request_usecase,
///     respond_chat_request_usecase,
///     request_status_usecase,
///     send_direct_message_usecase,
///     list_messages_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    registry: Arc<ConnectionRegistry>,
    relay: Arc<dyn EventRelay>,
    send_chat_request_usecase: Arc<SendChatRequestUseCase>,
    respond_chat_request_usecase: Arc<RespondChatRequestUseCase>,
    request_status_usecase: Arc<RequestStatusUseCase>,
    send_direct_message_usecase: Arc<SendDirectMessageUseCase>,
    list_messages_usecase: Arc<ListMessagesUseCase>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        relay: Arc<dyn EventRelay>,
        send_chat_request_usecase: Arc<SendChatRequestUseCase>,
        respond_chat_request_usecase: Arc<RespondChatRequestUseCase>,
        request_status_usecase: Arc<RequestStatusUseCase>,
        send_direct_message_usecase: Arc<SendDirectMessageUseCase>,
        list_messages_usecase: Arc<ListMessagesUseCase>,
    ) -> Self {
        Self {
            registry,
            relay,
            send_chat_request_usecase,
            respond_chat_request_usecase,
            request_status_usecase,
            send_direct_message_usecase,
            list_messages_usecase,
        }
    }

    /// Run the chat gateway server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            registry: self.registry,
            relay: self.relay,
            send_chat_request_usecase: self.send_chat_request_usecase,
            respond_chat_request_usecase: self.respond_chat_request_usecase,
            request_status_usecase: self.request_status_usecase,
            send_direct_message_usecase: self.send_direct_message_usecase,
            list_messages_usecase: self.list_messages_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/chat-requests/send", post(send_chat_request))
            .route("/api/chat-requests/respond", post(respond_chat_request))
            .route("/api/chat-requests/status", post(request_status))
            .route("/api/messages/{user_a}/{user_b}", get(list_messages))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Chat gateway listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
