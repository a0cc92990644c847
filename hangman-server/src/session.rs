use hangman_core::{ControllerSettings, GameController, TracingEventHandler};
use hangman_types::ShareScope;
use std::time::Duration;

use crate::indicator::TransientFlag;

/// Game state of one page view: the controller plus the two "Copied" flags
#[derive(Debug)]
pub struct Session {
    controller: GameController,
    progress_copied: TransientFlag,
    word_copied: TransientFlag,
}

impl Session {
    pub fn new(settings: ControllerSettings, copied_duration: Duration) -> Self {
        let mut controller = GameController::new(settings);
        controller.add_handler(Box::new(TracingEventHandler));

        Self {
            controller,
            progress_copied: TransientFlag::new(copied_duration),
            word_copied: TransientFlag::new(copied_duration),
        }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GameController {
        &mut self.controller
    }

    pub fn copied_flag(&self, scope: ShareScope) -> &TransientFlag {
        match scope {
            ShareScope::Progress => &self.progress_copied,
            ShareScope::WordOnly => &self.word_copied,
        }
    }
}
