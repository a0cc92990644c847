use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Setup,  // Entering or choosing a word
    Active, // Guessing in progress
    Over,   // Won or lost
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl GameOutcome {
    /// Heading shown on the end-of-game overlay
    pub fn headline(&self) -> &'static str {
        match self {
            GameOutcome::Won => "You Win!",
            GameOutcome::Lost => "You Lose!",
        }
    }
}

/// Which of the two share buttons was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShareScope {
    Progress, // In-game share, carries the guessed letters
    WordOnly, // End-of-game share, a fresh game on the same word
}

impl ShareScope {
    pub fn includes_guesses(&self) -> bool {
        matches!(self, ShareScope::Progress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MaskedChar {
    Space,
    Hidden,
    Revealed(char),
}

impl MaskedChar {
    pub fn display(&self) -> char {
        match self {
            MaskedChar::Space => '/',
            MaskedChar::Hidden => '_',
            MaskedChar::Revealed(c) => *c,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KeyState {
    pub letter: char,
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Illustration {
    pub index: u32,
    pub path: String,
}

/// Everything the page needs to render one position of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameView {
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
    pub headline: Option<String>,
    pub masked_word: Vec<MaskedChar>,
    pub display_word: String,
    pub guessed_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub max_wrong_guesses: u32,
    pub illustration: Illustration,
    pub keyboard: Vec<KeyState>,
    pub word: Option<String>,           // Only revealed once the game is over
    pub dictionary_url: Option<String>, // Only revealed once the game is over
    pub resume_path: Option<String>,
}
