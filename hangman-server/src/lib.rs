use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::Filter;

use crate::config::Config;
use crate::websocket::ConnectionManager;
use crate::word_provider::RandomWordProvider;
use hangman_core::{GameController, is_valid_word};

pub mod config;
pub mod indicator;
pub mod session;
pub mod websocket;
pub mod word_provider;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Deserialize)]
struct ShareQuery {
    w: Option<String>,
    l: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidateQuery {
    word: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateResponse {
    pub word: String,
    pub valid: bool,
}

pub fn create_routes(
    connection_manager: Arc<ConnectionManager>,
    word_provider: Arc<dyn RandomWordProvider>,
    config: Arc<Config>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let connection_manager_filter = warp::any().map({
        let connection_manager = connection_manager.clone();
        move || connection_manager.clone()
    });

    let word_provider_filter = warp::any().map({
        let word_provider = word_provider.clone();
        move || word_provider.clone()
    });

    let config_filter = warp::any().map({
        let config = config.clone();
        move || config.clone()
    });

    // The page itself, with or without share parameters
    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    // WebSocket endpoint, one game session per connection
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(connection_manager_filter)
        .and(word_provider_filter)
        .and(config_filter.clone())
        .and(warp::header::optional::<String>("origin"))
        .map(
            |ws: warp::ws::Ws,
             conn_mgr: Arc<ConnectionManager>,
             provider: Arc<dyn RandomWordProvider>,
             config: Arc<Config>,
             page_origin: Option<String>| {
                ws.on_upgrade(move |socket| {
                    websocket::handle_connection(socket, conn_mgr, provider, config, page_origin)
                })
            },
        );

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // What a viewer of a share link would see
    let game_preview = warp::path!("api" / "game")
        .and(warp::get())
        .and(warp::query::<ShareQuery>())
        .and(config_filter)
        .map(handle_game_preview);

    let validate = warp::path!("api" / "validate")
        .and(warp::get())
        .and(warp::query::<ValidateQuery>())
        .map(|query: ValidateQuery| {
            let valid = is_valid_word(&query.word);
            warp::reply::json(&ValidateResponse {
                word: query.word,
                valid,
            })
        });

    let illustrations = warp::path("hangman").and(warp::fs::dir(config.assets_dir.clone()));

    index
        .or(websocket)
        .or(health)
        .or(game_preview)
        .or(validate)
        .or(illustrations)
        .with(warp::log("hangman"))
}

fn handle_game_preview(query: ShareQuery, config: Arc<Config>) -> impl warp::Reply {
    let mut controller = GameController::new(config.controller_settings(None));
    if let Err(e) = controller.load_shared(query.w.as_deref(), query.l.as_deref()) {
        tracing::warn!("Preview of unusable share link: {}", e);
    }
    warp::reply::json(&controller.view())
}
