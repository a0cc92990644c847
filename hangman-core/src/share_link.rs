//! Share-link codec.
//!
//! A game position travels in two query parameters: `w` holds the secret word
//! as one lowercase two-digit hex group per character, `l` holds the guessed
//! letters as a plain run of characters.

use url::{Url, form_urlencoded};

use crate::word_validation::is_guessable;

pub const WORD_PARAM: &str = "w";
pub const LETTERS_PARAM: &str = "l";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareLinkError {
    #[error("Encoded word has odd length {0}")]
    OddLength(usize),
    #[error("Invalid hex digits at position {position}")]
    InvalidHex { position: usize },
    #[error("Character {0:?} cannot be encoded in a share link")]
    UnencodableChar(char),
    #[error("Decoded word {0:?} is not a valid word")]
    InvalidWord(String),
    #[error("No word to share")]
    NoWord,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Encode a word as two lowercase hex digits per character
pub fn encode_word(word: &str) -> Result<String, ShareLinkError> {
    word.chars()
        .map(|c| {
            u8::try_from(c)
                .map(|byte| format!("{:02x}", byte))
                .map_err(|_| ShareLinkError::UnencodableChar(c))
        })
        .collect()
}

/// Decode a `w` parameter, failing on the first malformed pair
pub fn decode_word(encoded: &str) -> Result<String, ShareLinkError> {
    let bytes = encoded.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(ShareLinkError::OddLength(bytes.len()));
    }

    bytes
        .chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let position = index * 2;
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return Err(ShareLinkError::InvalidHex { position });
            }
            // Both bytes are ASCII hex digits at this point
            let digits = std::str::from_utf8(pair)
                .map_err(|_| ShareLinkError::InvalidHex { position })?;
            u8::from_str_radix(digits, 16)
                .map(char::from)
                .map_err(|_| ShareLinkError::InvalidHex { position })
        })
        .collect()
}

pub fn encode_guesses(guesses: &[char]) -> String {
    guesses.iter().collect()
}

/// Decode an `l` parameter into distinct guessable letters, keeping entry order
pub fn decode_guesses(encoded: &str) -> Vec<char> {
    let mut guesses = Vec::new();
    for letter in encoded.chars() {
        if !is_guessable(letter) {
            tracing::warn!("Dropping unguessable character {:?} from shared letters", letter);
            continue;
        }
        if !guesses.contains(&letter) {
            guesses.push(letter);
        }
    }
    guesses
}

/// Query parameters of a share link, still encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareParams {
    pub word: Option<String>,
    pub letters: Option<String>,
}

impl ShareParams {
    /// Pull `w` and `l` out of a full share URL
    pub fn from_url(link: &str) -> Result<Self, ShareLinkError> {
        let url = Url::parse(link).map_err(|e| ShareLinkError::InvalidUrl(e.to_string()))?;
        let mut params = ShareParams::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                WORD_PARAM => params.word = Some(value.into_owned()),
                LETTERS_PARAM => params.letters = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(params)
    }
}

fn query_string(word: &str, guesses: Option<&[char]>) -> Result<String, ShareLinkError> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(WORD_PARAM, &encode_word(word)?);
    if let Some(guesses) = guesses {
        serializer.append_pair(LETTERS_PARAM, &encode_guesses(guesses));
    }
    Ok(serializer.finish())
}

/// Build an absolute share link on `origin`.
///
/// With `guesses` the link resumes the position; without it the link starts a
/// fresh game on the same word. An empty guess list still writes `l=`.
pub fn build_share_link(
    origin: &str,
    word: &str,
    guesses: Option<&[char]>,
) -> Result<String, ShareLinkError> {
    let mut url = Url::parse(origin).map_err(|e| ShareLinkError::InvalidUrl(e.to_string()))?;
    url.set_fragment(None);
    url.set_query(Some(&query_string(word, guesses)?));
    Ok(url.into())
}

/// Relative link (`?w=..&l=..`) for the address bar
pub fn resume_path(word: &str, guesses: &[char]) -> Result<String, ShareLinkError> {
    Ok(format!("?{}", query_string(word, Some(guesses))?))
}
