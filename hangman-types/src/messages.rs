use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameView, ShareScope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    LoadShared { w: Option<String>, l: Option<String> },
    CheckWord { word: String },
    StartGame { word: String },
    RequestRandomWord,
    GuessLetter { letter: char },
    ResetGuesses,
    ResetGame,
    Share { scope: ShareScope },
    Heartbeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    StateUpdate { state: GameView },
    WordValidity { word: String, valid: bool },
    InvalidWord { word: String },
    ShareLink { scope: ShareScope, url: String },
    CopiedIndicator { scope: ShareScope, copied: bool },
    Navigate { url: String },
    Error { message: String },
}
