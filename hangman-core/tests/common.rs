#![allow(dead_code)]

use hangman_core::{ControllerSettings, Game, GameController, GameEvent, GameEventHandler};
use std::sync::{Arc, Mutex};

pub const TEST_ORIGIN: &str = "http://hangman.test";

pub fn test_settings() -> ControllerSettings {
    ControllerSettings {
        share_origin: TEST_ORIGIN.to_string(),
        ..ControllerSettings::default()
    }
}

/// Creates a game already started on `word`
pub fn create_game_with_word(word: &str) -> Game {
    let mut game = Game::new();
    game.start(word).expect("test word should be valid");
    game
}

/// Guess every letter of `letters` in order, ignoring no-op guesses
pub fn guess_all(game: &mut Game, letters: &str) {
    for letter in letters.chars() {
        game.guess(letter).expect("test letters should be guessable");
    }
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Creates a controller wired to a collector
pub fn create_test_controller() -> (GameController, EventCollector) {
    let collector = EventCollector::new();
    let mut controller = GameController::new(test_settings());
    controller.add_handler(Box::new(collector.clone()));
    (controller, collector)
}
