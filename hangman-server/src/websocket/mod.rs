use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::config::Config;
use crate::session::Session;
use crate::word_provider::RandomWordProvider;
use hangman_types::{ClientMessage, GameError, ServerMessage};

pub mod connection;
pub mod handlers;
pub mod rate_limiter;

use connection::ConnectionId;
pub use connection::{ConnectionManager, DeliveryError};
use handlers::MessageHandler;
use rate_limiter::RateLimiter;

pub async fn handle_connection(
    websocket: WebSocket,
    connection_manager: Arc<ConnectionManager>,
    word_provider: Arc<dyn RandomWordProvider>,
    config: Arc<Config>,
    page_origin: Option<String>,
) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let mut rate_limiter =
        RateLimiter::new_with_limits(config.rate_limit_max_messages, config.rate_limit_refill());

    // Create connection and get receiver for outgoing messages
    let message_receiver = connection_manager.register(connection_id).await;

    let session = Session::new(
        config.controller_settings(page_origin.as_deref()),
        config.copied_indicator_duration(),
    );
    let message_handler = MessageHandler::new(
        connection_id,
        connection_manager.clone(),
        session,
        word_provider,
    );

    // Handle incoming messages
    let incoming_handler = {
        let message_handler = message_handler.clone();
        let connection_manager = connection_manager.clone();

        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if let Err(e) =
                            handle_message(msg, &mut rate_limiter, &message_handler, connection_id)
                                .await
                        {
                            warn!("Rejected message from {}: {}", connection_id, e);
                            let report = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            // Rejected messages are dropped, the session stays open
                            if connection_manager.send(connection_id, report).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    };

    // Handle outgoing messages
    let outgoing_handler = async move {
        let mut receiver = message_receiver;

        while let Some(message) = receiver.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize message: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(Message::text(json)).await {
                warn!("Failed to send message to {}: {:?}", connection_id, e);
                break;
            }
        }
    };

    // Run both handlers concurrently
    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    info!("Connection {} disconnected", connection_id);
    message_handler.handle_disconnect().await;
    connection_manager.remove(connection_id).await;
}

async fn handle_message(
    msg: Message,
    rate_limiter: &mut RateLimiter,
    message_handler: &MessageHandler,
    connection_id: ConnectionId,
) -> Result<(), GameError> {
    if !rate_limiter.check_rate_limit() {
        warn!("Rate limit exceeded for connection {}", connection_id);
        return Err(GameError::RateLimitExceeded);
    }

    // Only handle text messages
    let Ok(text) = msg.to_str() else {
        return Ok(());
    };

    let client_message: ClientMessage =
        serde_json::from_str(text).map_err(|e| GameError::InvalidMessage {
            reason: e.to_string(),
        })?;

    if let Err(e) = message_handler.handle_message(client_message).await {
        // Only fails when the outgoing side is gone
        warn!("Message handling error for {}: {}", connection_id, e);
    }

    Ok(())
}
