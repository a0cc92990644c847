use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use hangman_server::{
    config::Config, create_routes, websocket::ConnectionManager,
    word_provider::HttpWordProvider,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let word_provider = match HttpWordProvider::new(
        config.random_word_url.clone(),
        config.random_word_timeout(),
    ) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            tracing::error!("Failed to build random word client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Random words from {}", config.random_word_url);
    match &config.public_origin {
        Some(origin) => info!("Share links point at {}", origin),
        None => info!("Share links follow each page's origin"),
    }

    let connection_manager = Arc::new(ConnectionManager::new());

    let routes = create_routes(connection_manager.clone(), word_provider, config.clone());

    // Drop page views that stopped talking to us
    let _reaper =
        connection_manager.spawn_reaper(Duration::from_secs(30), config.connection_timeout());

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown(config.bind_addr(), shutdown_signal());

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

async fn shutdown_signal() {
    // Wait for SIGINT (Ctrl+C) or SIGTERM
    #[cfg(unix)]
    {
        let (Ok(mut sigint), Ok(mut sigterm)) = (
            signal::unix::signal(signal::unix::SignalKind::interrupt()),
            signal::unix::signal(signal::unix::SignalKind::terminate()),
        ) else {
            tracing::error!("Failed to install signal handlers");
            std::future::pending::<()>().await;
            return;
        };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
