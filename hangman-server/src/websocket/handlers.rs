use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::Session;
use crate::websocket::connection::{ConnectionId, ConnectionManager, DeliveryError};
use crate::word_provider::RandomWordProvider;
use hangman_core::GuessError;
use hangman_types::{ClientMessage, GameError, ServerMessage, ShareScope};

/// Applies one connection's client messages to its session
#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    session: Arc<Mutex<Session>>,
    word_provider: Arc<dyn RandomWordProvider>,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        session: Session,
        word_provider: Arc<dyn RandomWordProvider>,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            session: Arc::new(Mutex::new(session)),
            word_provider,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), DeliveryError> {
        self.connection_manager
            .touch(self.connection_id)
            .await;

        match message {
            ClientMessage::LoadShared { w, l } => self.handle_load_shared(w, l).await,
            ClientMessage::CheckWord { word } => self.handle_check_word(word).await,
            ClientMessage::StartGame { word } => self.handle_start_game(word).await,
            ClientMessage::RequestRandomWord => self.handle_request_random_word().await,
            ClientMessage::GuessLetter { letter } => self.handle_guess_letter(letter).await,
            ClientMessage::ResetGuesses => self.handle_reset_guesses().await,
            ClientMessage::ResetGame => self.handle_reset_game().await,
            ClientMessage::Share { scope } => self.handle_share(scope).await,
            ClientMessage::Heartbeat => Ok(()),
        }
    }

    pub async fn handle_disconnect(&self) {
        info!("Handling disconnect for connection {}", self.connection_id);
        let session = self.session.lock().await;
        session.copied_flag(ShareScope::Progress).cancel();
        session.copied_flag(ShareScope::WordOnly).cancel();
    }

    async fn handle_load_shared(
        &self,
        w: Option<String>,
        l: Option<String>,
    ) -> Result<(), DeliveryError> {
        let (state, rejected) = {
            let mut session = self.session.lock().await;
            let result = session
                .controller_mut()
                .load_shared(w.as_deref(), l.as_deref());
            if let Err(e) = &result {
                warn!(
                    "Connection {} sent an unusable share link: {}",
                    self.connection_id, e
                );
            }
            (session.controller().view(), result.is_err())
        };

        self.send_message(ServerMessage::StateUpdate { state })
            .await?;
        if rejected {
            self.send_message(ServerMessage::Navigate {
                url: "/".to_string(),
            })
            .await?;
        }
        Ok(())
    }

    async fn handle_check_word(&self, word: String) -> Result<(), DeliveryError> {
        let valid = self.session.lock().await.controller().check_word(&word);
        self.send_message(ServerMessage::WordValidity { word, valid })
            .await
    }

    async fn handle_start_game(&self, word: String) -> Result<(), DeliveryError> {
        let result = {
            let mut session = self.session.lock().await;
            session
                .controller_mut()
                .start_game(&word)
                .map(|()| session.controller().view())
        };

        match result {
            Ok(state) => self.send_message(ServerMessage::StateUpdate { state }).await,
            Err(e) => {
                info!("Connection {} rejected word: {}", self.connection_id, e);
                self.send_message(ServerMessage::InvalidWord { word }).await
            }
        }
    }

    /// Fire-and-forget: the fetch runs on its own task so guesses keep flowing.
    /// Two overlapping requests both apply, the later answer wins.
    async fn handle_request_random_word(&self) -> Result<(), DeliveryError> {
        let handler = self.clone();
        tokio::spawn(async move {
            handler.fetch_random_word().await;
        });
        Ok(())
    }

    async fn fetch_random_word(&self) {
        let word = match self.word_provider.random_word().await {
            Ok(word) => word,
            Err(e) => {
                error!(
                    "Failed to fetch random word for {}: {}",
                    self.connection_id, e
                );
                return;
            }
        };

        let applied = {
            let mut session = self.session.lock().await;
            session
                .controller_mut()
                .apply_random_word(&word)
                .map(|()| session.controller().view())
        };

        let message = match applied {
            Ok(state) => ServerMessage::StateUpdate { state },
            Err(e) => {
                warn!("Random word provider returned {:?}: {}", word, e);
                ServerMessage::InvalidWord { word }
            }
        };
        if let Err(e) = self.send_message(message).await {
            warn!(
                "Could not deliver random word to {}: {}",
                self.connection_id, e
            );
        }
    }

    async fn handle_guess_letter(&self, letter: char) -> Result<(), DeliveryError> {
        let result = {
            let mut session = self.session.lock().await;
            session
                .controller_mut()
                .guess_letter(letter)
                .map(|outcome| outcome.changed_state().then(|| session.controller().view()))
        };

        match result {
            Ok(Some(state)) => self.send_message(ServerMessage::StateUpdate { state }).await,
            Ok(None) => Ok(()),
            Err(GuessError::InvalidLetter(letter)) => {
                self.send_error(GameError::InvalidLetter { letter }).await
            }
        }
    }

    async fn handle_reset_guesses(&self) -> Result<(), DeliveryError> {
        let state = {
            let mut session = self.session.lock().await;
            session.controller_mut().reset_guesses();
            session.controller().view()
        };
        self.send_message(ServerMessage::StateUpdate { state })
            .await
    }

    async fn handle_reset_game(&self) -> Result<(), DeliveryError> {
        let state = {
            let mut session = self.session.lock().await;
            session.controller_mut().reset_game();
            session.controller().view()
        };
        self.send_message(ServerMessage::StateUpdate { state })
            .await?;
        self.send_message(ServerMessage::Navigate {
            url: "/".to_string(),
        })
        .await
    }

    async fn handle_share(&self, scope: ShareScope) -> Result<(), DeliveryError> {
        let mut session = self.session.lock().await;
        let url = match session.controller_mut().share(scope) {
            Ok(url) => url,
            Err(e) => {
                drop(session);
                warn!("Connection {} cannot share: {}", self.connection_id, e);
                return self
                    .send_message(ServerMessage::Error {
                        message: e.to_string(),
                    })
                    .await;
            }
        };

        // The indicator is raised whether or not the clipboard write succeeds
        let connection_manager = self.connection_manager.clone();
        let connection_id = self.connection_id;
        session.copied_flag(scope).trigger(async move {
            let message = ServerMessage::CopiedIndicator {
                scope,
                copied: false,
            };
            if let Err(e) = connection_manager
                .send(connection_id, message)
                .await
            {
                warn!("Could not clear copied indicator for {}: {}", connection_id, e);
            }
        });
        drop(session);

        self.send_message(ServerMessage::ShareLink { scope, url })
            .await?;
        self.send_message(ServerMessage::CopiedIndicator {
            scope,
            copied: true,
        })
        .await
    }

    async fn send_message(&self, message: ServerMessage) -> Result<(), DeliveryError> {
        self.connection_manager
            .send(self.connection_id, message)
            .await
    }

    async fn send_error(&self, error: GameError) -> Result<(), DeliveryError> {
        self.send_message(ServerMessage::Error {
            message: error.to_string(),
        })
        .await
    }
}
