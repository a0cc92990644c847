use regex::Regex;
use std::sync::LazyLock;

/// Shortest word that can be played
pub const MIN_WORD_LENGTH: usize = 3;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z ]+$").expect("word pattern is a valid regex"));

/// Check if a word can be used as the secret word.
///
/// Letters and spaces only, at least [`MIN_WORD_LENGTH`] characters. The check
/// runs against the casing passed in; entry lowercases on its own.
pub fn is_valid_word(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    if word.chars().count() < MIN_WORD_LENGTH {
        return false;
    }
    WORD_PATTERN.is_match(word)
}

/// Characters that may appear in the guessed letters
pub fn is_guessable(letter: char) -> bool {
    letter.is_ascii_alphabetic() || letter == ' '
}

/// Normalize a typed word before storing it
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}
