//! Chat gateway server.
//!
//! Tracks online presence, runs the chat-request handshake, and relays
//! direct messages between connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-server
//! cargo run --bin tsunagi-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use tsunagi_server::{
    infrastructure::{
        registry::ConnectionRegistry,
        relay::WebSocketRelay,
        store::{InMemoryChatRequestStore, InMemoryMessageStore},
    },
    ui::Server,
    usecase::{
        ListMessagesUseCase, RequestStatusUseCase, RespondChatRequestUseCase,
        SendChatRequestUseCase, SendDirectMessageUseCase,
    },
};
use tsunagi_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Chat gateway with presence, chat requests, and message relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Stores
    // 2. ConnectionRegistry
    // 3. EventRelay
    // 4. UseCases
    // 5. Server

    // 1. Create stores (in-memory database)
    let chat_requests = Arc::new(InMemoryChatRequestStore::new());
    let messages = Arc::new(InMemoryMessageStore::new());

    // 2. Create the connection registry (presence source of truth)
    let registry = Arc::new(ConnectionRegistry::new());

    // 3. Create the relay (WebSocket implementation)
    let relay = Arc::new(WebSocketRelay::new(registry.clone()));

    // 4. Create UseCases
    let clock = Arc::new(SystemClock);
    let send_chat_request_usecase = Arc::new(SendChatRequestUseCase::new(
        chat_requests.clone(),
        relay.clone(),
        clock.clone(),
    ));
    let respond_chat_request_usecase = Arc::new(RespondChatRequestUseCase::new(
        chat_requests.clone(),
        relay.clone(),
    ));
    let request_status_usecase = Arc::new(RequestStatusUseCase::new(chat_requests.clone()));
    let send_direct_message_usecase =
        Arc::new(SendDirectMessageUseCase::new(messages.clone(), clock));
    let list_messages_usecase = Arc::new(ListMessagesUseCase::new(messages.clone()));

    // 5. Create and run the server
    let server = Server::new(
        registry,
        relay,
        send_chat_request_usecase,
        respond_chat_request_usecase,
        request_status_usecase,
        send_direct_message_usecase,
        list_messages_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
