use hangman_types::{Illustration, MAX_WRONG_GUESSES};

/// Illustration assets, one per wrong-guess count from 0 to 6
pub const ILLUSTRATION_PATHS: [&str; 7] = [
    "/hangman/0.svg",
    "/hangman/1.svg",
    "/hangman/2.svg",
    "/hangman/3.svg",
    "/hangman/4.svg",
    "/hangman/5.svg",
    "/hangman/6.svg",
];

const LAST_INDEX: usize = ILLUSTRATION_PATHS.len() - 1;

/// Illustration index for a wrong-guess count, clamped to the last drawing
pub fn image_for_wrong_count(wrong_guesses: u32) -> usize {
    (wrong_guesses as usize).min(LAST_INDEX)
}

pub fn illustration_for(wrong_guesses: u32) -> Illustration {
    let index = image_for_wrong_count(wrong_guesses);
    Illustration {
        index: index as u32,
        path: ILLUSTRATION_PATHS[index].to_string(),
    }
}

// The final drawing is the losing one
const _: () = assert!(LAST_INDEX == MAX_WRONG_GUESSES as usize);
