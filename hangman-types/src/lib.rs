pub mod errors;
pub mod game;
pub mod messages;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;

/// Number of wrong guesses that ends the game
pub const MAX_WRONG_GUESSES: u32 = 6;
