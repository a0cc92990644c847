use url::Url;

use crate::ShareLinkError;

pub const DEFAULT_DICTIONARY_URL: &str = "https://www.dictionary.com/browse/";

/// Link to the dictionary entry for a revealed word
pub fn dictionary_url(base: &str, word: &str) -> Result<String, ShareLinkError> {
    let base = Url::parse(base).map_err(|e| ShareLinkError::InvalidUrl(e.to_string()))?;
    let url = base
        .join(word)
        .map_err(|e| ShareLinkError::InvalidUrl(e.to_string()))?;
    Ok(url.into())
}
