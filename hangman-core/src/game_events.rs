use hangman_types::{GameOutcome, ShareScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted {
        word_length: usize,
        random: bool,
    },
    SharedGameLoaded {
        word_length: usize,
        guesses: usize,
    },
    SharedGameRejected {
        reason: String,
    },
    InvalidWordRejected {
        word: String,
    },
    LetterGuessed {
        letter: char,
        correct: bool,
        wrong_guesses: u32,
    },
    GameFinished {
        outcome: GameOutcome,
        word: String,
        wrong_guesses: u32,
    },
    GuessesReset,
    GameReset,
    LinkShared {
        scope: ShareScope,
    },
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Simple event bus for distributing game events
#[derive(Default)]
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Writes every event to the tracing log
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SharedGameRejected { reason } => {
                tracing::warn!("Shared game rejected: {}", reason)
            }
            GameEvent::GameFinished {
                outcome,
                wrong_guesses,
                ..
            } => tracing::info!("Game finished: {:?} with {} wrong guesses", outcome, wrong_guesses),
            other => tracing::debug!("Game event: {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: &GameEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_event_bus() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut bus = GameEventBus::new();
        bus.add_handler(Box::new(TestHandler {
            events: events.clone(),
        }));
        bus.add_handler(Box::new(TracingEventHandler));
        assert_eq!(format!("{:?}", bus), "GameEventBus { handlers: 2 }");

        bus.publish(GameEvent::GuessesReset);
        bus.publish(GameEvent::GameReset);

        assert_eq!(
            *events.lock().unwrap(),
            vec![GameEvent::GuessesReset, GameEvent::GameReset]
        );
    }

    #[test]
    fn test_empty_bus_accepts_events() {
        let mut bus = GameEventBus::new();
        bus.publish(GameEvent::LinkShared {
            scope: ShareScope::Progress,
        });
        assert_eq!(format!("{:?}", bus), "GameEventBus { handlers: 0 }");
    }
}
