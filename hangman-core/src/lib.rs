pub mod controller;
pub mod dictionary;
pub mod game_events;
pub mod game_state;
pub mod illustration;
pub mod share_link;
pub mod word_validation;

// Re-export main components
pub use controller::*;
pub use dictionary::*;
pub use game_events::*;
pub use game_state::*;
pub use illustration::*;
pub use share_link::*;
pub use word_validation::*;
