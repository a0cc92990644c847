use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    InvalidLetter { letter: char },
    InvalidMessage { reason: String },
    RateLimitExceeded,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidLetter { letter } => write!(f, "Invalid letter: {:?}", letter),
            GameError::InvalidMessage { reason } => write!(f, "Invalid JSON message: {}", reason),
            GameError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
        }
    }
}
