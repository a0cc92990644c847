use hangman_types::{GameOutcome, GamePhase, KeyState, MAX_WRONG_GUESSES, MaskedChar};

use crate::share_link::{ShareLinkError, decode_guesses, decode_word};
use crate::word_validation::{is_guessable, is_valid_word, normalize_word};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("Invalid word")]
    InvalidWord { word: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("Invalid letter: {0:?}")]
    InvalidLetter(char),
}

/// What a single guess did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    AlreadyGuessed,
    GameOver,
    NotStarted,
}

impl GuessOutcome {
    pub fn changed_state(&self) -> bool {
        matches!(self, GuessOutcome::Correct | GuessOutcome::Wrong)
    }
}

/// State of one hangman game.
///
/// Only the secret word and the guessed letters are stored. The wrong-guess
/// count, the phase and the outcome are recomputed from them on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    word: Option<String>,
    guessed: Vec<char>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game on a typed word. An invalid word leaves the game untouched.
    pub fn start(&mut self, word: &str) -> Result<(), StartError> {
        if !is_valid_word(word) {
            return Err(StartError::InvalidWord {
                word: word.to_string(),
            });
        }

        self.word = Some(normalize_word(word));
        self.guessed.clear();
        Ok(())
    }

    /// Restore a shared position from its `w` and `l` parameters.
    ///
    /// Without `w` the game goes back to setup. A word that fails to decode or
    /// is not a valid word also resets to setup and reports why.
    pub fn load_shared(&mut self, w: Option<&str>, l: Option<&str>) -> Result<(), ShareLinkError> {
        self.reset();

        let Some(encoded) = w.filter(|w| !w.is_empty()) else {
            return Ok(());
        };

        let word = decode_word(encoded)?;
        if !is_valid_word(&word) {
            return Err(ShareLinkError::InvalidWord(word));
        }

        self.word = Some(word);
        self.guessed = l.map(decode_guesses).unwrap_or_default();
        Ok(())
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome, GuessError> {
        if !is_guessable(letter) {
            return Err(GuessError::InvalidLetter(letter));
        }

        let Some(word) = self.word.as_deref() else {
            return Ok(GuessOutcome::NotStarted);
        };
        if self.outcome().is_some() {
            return Ok(GuessOutcome::GameOver);
        }
        if self.guessed.contains(&letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }

        let correct = letter == ' ' || word.contains(letter);
        self.guessed.push(letter);

        Ok(if correct {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Wrong
        })
    }

    /// Clear the guesses but keep playing the same word
    pub fn reset_guesses(&mut self) {
        self.guessed.clear();
    }

    /// Back to setup with no word
    pub fn reset(&mut self) {
        self.word = None;
        self.guessed.clear();
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    pub fn is_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    pub fn wrong_guess_count(&self) -> u32 {
        let Some(word) = self.word.as_deref() else {
            return 0;
        };
        self.guessed
            .iter()
            .filter(|&&letter| letter != ' ' && !word.contains(letter))
            .count() as u32
    }

    fn is_solved(&self) -> bool {
        match self.word.as_deref() {
            Some(word) => word
                .chars()
                .filter(|&c| c != ' ')
                .all(|c| self.guessed.contains(&c)),
            None => false,
        }
    }

    /// Win is checked before loss, so a position that completes the word
    /// while holding the sixth miss counts as a win.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.word.as_ref()?;
        if self.is_solved() {
            Some(GameOutcome::Won)
        } else if self.wrong_guess_count() >= MAX_WRONG_GUESSES {
            Some(GameOutcome::Lost)
        } else {
            None
        }
    }

    pub fn phase(&self) -> GamePhase {
        match (self.word.as_ref(), self.outcome()) {
            (None, _) => GamePhase::Setup,
            (Some(_), Some(_)) => GamePhase::Over,
            (Some(_), None) => GamePhase::Active,
        }
    }

    pub fn masked_word(&self) -> Vec<MaskedChar> {
        self.word
            .as_deref()
            .unwrap_or_default()
            .chars()
            .map(|c| {
                if c == ' ' {
                    MaskedChar::Space
                } else if self.guessed.contains(&c) {
                    MaskedChar::Revealed(c)
                } else {
                    MaskedChar::Hidden
                }
            })
            .collect()
    }

    /// Masked word as shown on the board, e.g. `c _ t / _ _ _`
    pub fn display_word(&self) -> String {
        self.masked_word()
            .iter()
            .map(|masked| masked.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The 26 on-screen keys with already guessed letters marked as used
    pub fn keyboard(&self) -> Vec<KeyState> {
        ('a'..='z')
            .map(|letter| KeyState {
                letter,
                used: self.is_guessed(letter),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with_word(word: &str) -> Game {
        let mut game = Game::new();
        game.start(word).unwrap();
        game
    }

    fn guess_all(game: &mut Game, letters: &str) {
        for letter in letters.chars() {
            game.guess(letter).unwrap();
        }
    }

    #[test]
    fn test_new_game_is_in_setup() {
        let game = Game::new();
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.word(), None);
        assert_eq!(game.wrong_guess_count(), 0);
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_start_lowercases_word() {
        let game = game_with_word("Hello World");
        assert_eq!(game.word(), Some("hello world"));
        assert_eq!(game.phase(), GamePhase::Active);
    }

    #[test]
    fn test_start_rejects_invalid_word() {
        let mut game = Game::new();
        let result = game.start("cat1");
        assert_eq!(
            result,
            Err(StartError::InvalidWord {
                word: "cat1".to_string()
            })
        );
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.word(), None);
    }

    #[test]
    fn test_start_clears_previous_guesses() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "xa");
        game.start("dog").unwrap();
        assert!(game.guessed_letters().is_empty());
        assert_eq!(game.wrong_guess_count(), 0);
    }

    #[test]
    fn test_win() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "cat");
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.outcome(), Some(GameOutcome::Won));
        assert_eq!(game.wrong_guess_count(), 0);
    }

    #[test]
    fn test_loss() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "bdefgh");
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.outcome(), Some(GameOutcome::Lost));
        assert_eq!(game.wrong_guess_count(), 6);
    }

    #[test]
    fn test_five_misses_keep_playing() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "bdefg");
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.wrong_guess_count(), 5);
    }

    #[test]
    fn test_guess_outcomes() {
        let mut game = game_with_word("cat");
        assert_eq!(game.guess('c'), Ok(GuessOutcome::Correct));
        assert_eq!(game.guess('z'), Ok(GuessOutcome::Wrong));
        assert_eq!(game.guess('c'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.guess('1'), Err(GuessError::InvalidLetter('1')));
    }

    #[test]
    fn test_repeated_guess_is_noop() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "cz");
        let before = game.clone();

        assert_eq!(game.guess('z'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.guess('c'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game, before);
        assert_eq!(game.wrong_guess_count(), 1);
        assert_eq!(game.phase(), GamePhase::Active);
    }

    #[test]
    fn test_guess_ignored_when_over() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "bdefgh");
        assert_eq!(game.guess('c'), Ok(GuessOutcome::GameOver));
        assert!(!game.is_guessed('c'));
        assert_eq!(game.wrong_guess_count(), 6);
    }

    #[test]
    fn test_guess_ignored_in_setup() {
        let mut game = Game::new();
        assert_eq!(game.guess('a'), Ok(GuessOutcome::NotStarted));
        assert!(game.guessed_letters().is_empty());
    }

    #[test]
    fn test_space_is_never_wrong() {
        let mut game = game_with_word("cat");
        assert_eq!(game.guess(' '), Ok(GuessOutcome::Correct));
        assert_eq!(game.wrong_guess_count(), 0);
        assert_eq!(game.guessed_letters(), &[' ']);
    }

    #[test]
    fn test_spaces_do_not_need_guessing() {
        let mut game = game_with_word("a cat");
        guess_all(&mut game, "act");
        assert_eq!(game.outcome(), Some(GameOutcome::Won));
    }

    #[test]
    fn test_guesses_are_case_sensitive() {
        let mut game = Game::new();
        game.load_shared(Some("436174"), None).unwrap(); // "Cat"
        assert_eq!(game.guess('c'), Ok(GuessOutcome::Wrong));
        assert_eq!(game.guess('C'), Ok(GuessOutcome::Correct));
    }

    #[test]
    fn test_wrong_count_matches_definition() {
        let mut game = game_with_word("hang man");
        let sequence = "zhqa  xnqpmkw";
        for letter in sequence.chars() {
            let _ = game.guess(letter);
            let word = game.word().unwrap();
            let expected = game
                .guessed_letters()
                .iter()
                .filter(|&&c| c != ' ' && !word.contains(c))
                .count() as u32;
            assert_eq!(game.wrong_guess_count(), expected);
        }
    }

    #[test]
    fn test_reset_guesses_after_loss() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "bdefgh");
        game.reset_guesses();
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.wrong_guess_count(), 0);
        assert!(game.guessed_letters().is_empty());
        assert_eq!(game.word(), Some("cat"));
    }

    #[test]
    fn test_reset_returns_to_setup() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "ca");
        game.reset();
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.word(), None);
        assert!(game.guessed_letters().is_empty());
    }

    #[test]
    fn test_load_shared_position() {
        let mut game = Game::new();
        game.load_shared(Some("636174"), Some("cx")).unwrap();
        assert_eq!(game.word(), Some("cat"));
        assert_eq!(game.guessed_letters(), &['c', 'x']);
        assert_eq!(game.wrong_guess_count(), 1);
        assert_eq!(game.phase(), GamePhase::Active);
    }

    #[test]
    fn test_load_shared_finished_position() {
        let mut game = Game::new();
        game.load_shared(Some("636174"), Some("bdefgh")).unwrap();
        assert_eq!(game.outcome(), Some(GameOutcome::Lost));
    }

    #[test]
    fn test_load_shared_without_word() {
        let mut game = game_with_word("cat");
        game.load_shared(None, Some("abc")).unwrap();
        assert_eq!(game.phase(), GamePhase::Setup);
        assert!(game.guessed_letters().is_empty());

        game.load_shared(Some(""), None).unwrap();
        assert_eq!(game.phase(), GamePhase::Setup);
    }

    #[test]
    fn test_load_shared_malformed_word_resets() {
        let mut game = game_with_word("cat");
        let result = game.load_shared(Some("6361zz"), Some("c"));
        assert_eq!(result, Err(ShareLinkError::InvalidHex { position: 4 }));
        assert_eq!(game.phase(), GamePhase::Setup);

        let result = game.load_shared(Some("63617"), None);
        assert_eq!(result, Err(ShareLinkError::OddLength(5)));
        assert_eq!(game.phase(), GamePhase::Setup);
    }

    #[test]
    fn test_load_shared_invalid_word_resets() {
        let mut game = Game::new();
        // "ab" is too short
        let result = game.load_shared(Some("6162"), None);
        assert_eq!(result, Err(ShareLinkError::InvalidWord("ab".to_string())));
        assert_eq!(game.phase(), GamePhase::Setup);

        // "c4t"
        let result = game.load_shared(Some("633474"), None);
        assert!(matches!(result, Err(ShareLinkError::InvalidWord(_))));
        assert_eq!(game.word(), None);
    }

    #[test]
    fn test_win_beats_sixth_miss() {
        // Only reachable through a shared link: the word is complete and six
        // misses are on the board at the same time.
        let mut game = Game::new();
        game.load_shared(Some("636174"), Some("bdefghcat")).unwrap();
        assert_eq!(game.wrong_guess_count(), 6);
        assert_eq!(game.outcome(), Some(GameOutcome::Won));
        assert_eq!(game.phase(), GamePhase::Over);
    }

    #[test]
    fn test_masked_word() {
        let mut game = game_with_word("a cat");
        guess_all(&mut game, "t");
        assert_eq!(
            game.masked_word(),
            vec![
                MaskedChar::Hidden,
                MaskedChar::Space,
                MaskedChar::Hidden,
                MaskedChar::Hidden,
                MaskedChar::Revealed('t'),
            ]
        );
        assert_eq!(game.display_word(), "_ / _ _ t");
    }

    #[test]
    fn test_keyboard() {
        let mut game = game_with_word("cat");
        guess_all(&mut game, "az");
        let keyboard = game.keyboard();
        assert_eq!(keyboard.len(), 26);
        assert_eq!(keyboard[0], KeyState { letter: 'a', used: true });
        assert_eq!(keyboard[1], KeyState { letter: 'b', used: false });
        assert_eq!(keyboard[25], KeyState { letter: 'z', used: true });
    }
}
