use hangman_types::{GamePhase, GameView, MAX_WRONG_GUESSES, ShareScope};

use crate::dictionary::{DEFAULT_DICTIONARY_URL, dictionary_url};
use crate::game_events::{GameEvent, GameEventBus, GameEventHandler};
use crate::game_state::{Game, GuessError, GuessOutcome, StartError};
use crate::illustration::illustration_for;
use crate::share_link::{ShareLinkError, build_share_link, resume_path};
use crate::word_validation::is_valid_word;

pub const DEFAULT_SHARE_ORIGIN: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Origin that share links point at
    pub share_origin: String,
    /// Base URL the revealed word is appended to
    pub dictionary_url: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
        }
    }
}

/// Drives one game in response to player actions and publishes what happened
#[derive(Debug)]
pub struct GameController {
    game: Game,
    settings: ControllerSettings,
    events: GameEventBus,
}

impl GameController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            game: Game::new(),
            settings,
            events: GameEventBus::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    /// Whether a draft word would be accepted by [`GameController::start_game`]
    pub fn check_word(&self, word: &str) -> bool {
        is_valid_word(word)
    }

    pub fn start_game(&mut self, word: &str) -> Result<(), StartError> {
        self.start(word, false)
    }

    /// Start on a word handed back by the random word provider
    pub fn apply_random_word(&mut self, word: &str) -> Result<(), StartError> {
        self.start(word, true)
    }

    fn start(&mut self, word: &str, random: bool) -> Result<(), StartError> {
        if let Err(e) = self.game.start(word) {
            self.events.publish(GameEvent::InvalidWordRejected {
                word: word.to_string(),
            });
            return Err(e);
        }

        self.events.publish(GameEvent::GameStarted {
            word_length: word.chars().count(),
            random,
        });
        Ok(())
    }

    pub fn load_shared(&mut self, w: Option<&str>, l: Option<&str>) -> Result<(), ShareLinkError> {
        match self.game.load_shared(w, l) {
            Ok(()) => {
                if let Some(word) = self.game.word() {
                    let event = GameEvent::SharedGameLoaded {
                        word_length: word.chars().count(),
                        guesses: self.game.guessed_letters().len(),
                    };
                    self.events.publish(event);
                }
                Ok(())
            }
            Err(e) => {
                self.events.publish(GameEvent::SharedGameRejected {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn guess_letter(&mut self, letter: char) -> Result<GuessOutcome, GuessError> {
        let outcome = self.game.guess(letter)?;
        if !outcome.changed_state() {
            return Ok(outcome);
        }

        let wrong_guesses = self.game.wrong_guess_count();
        self.events.publish(GameEvent::LetterGuessed {
            letter,
            correct: outcome == GuessOutcome::Correct,
            wrong_guesses,
        });

        if let (Some(result), Some(word)) = (self.game.outcome(), self.game.word()) {
            let event = GameEvent::GameFinished {
                outcome: result,
                word: word.to_string(),
                wrong_guesses,
            };
            self.events.publish(event);
        }

        Ok(outcome)
    }

    /// Replay the same word from scratch. Does nothing during setup.
    pub fn reset_guesses(&mut self) {
        if self.game.phase() == GamePhase::Setup {
            return;
        }
        self.game.reset_guesses();
        self.events.publish(GameEvent::GuessesReset);
    }

    pub fn reset_game(&mut self) {
        self.game.reset();
        self.events.publish(GameEvent::GameReset);
    }

    /// Absolute link to the current word, with the guesses when asked for
    pub fn build_share_link(&self, include_guesses: bool) -> Result<String, ShareLinkError> {
        let word = self.game.word().ok_or(ShareLinkError::NoWord)?;
        let guesses = include_guesses.then(|| self.game.guessed_letters());
        build_share_link(&self.settings.share_origin, word, guesses)
    }

    pub fn share(&mut self, scope: ShareScope) -> Result<String, ShareLinkError> {
        let link = self.build_share_link(scope.includes_guesses())?;
        self.events.publish(GameEvent::LinkShared { scope });
        Ok(link)
    }

    pub fn view(&self) -> GameView {
        let game = &self.game;
        let wrong_guesses = game.wrong_guess_count();
        let outcome = game.outcome();

        let revealed_word = outcome.and(game.word());
        let dictionary = revealed_word.and_then(|word| {
            dictionary_url(&self.settings.dictionary_url, word)
                .map_err(|e| tracing::warn!("Cannot build dictionary link: {}", e))
                .ok()
        });
        let resume = game.word().and_then(|word| {
            resume_path(word, game.guessed_letters())
                .map_err(|e| tracing::warn!("Cannot build resume path: {}", e))
                .ok()
        });

        GameView {
            phase: game.phase(),
            outcome,
            headline: outcome.map(|outcome| outcome.headline().to_string()),
            masked_word: game.masked_word(),
            display_word: game.display_word(),
            guessed_letters: game.guessed_letters().to_vec(),
            wrong_guesses,
            max_wrong_guesses: MAX_WRONG_GUESSES,
            illustration: illustration_for(wrong_guesses),
            keyboard: game.keyboard(),
            word: revealed_word.map(str::to_string),
            dictionary_url: dictionary,
            resume_path: resume,
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}
