use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum WordProviderError {
    #[error("Random word request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Random word service returned no words")]
    EmptyResponse,
}

/// Source of random secret words
#[async_trait]
pub trait RandomWordProvider: Send + Sync {
    async fn random_word(&self) -> Result<String, WordProviderError>;
}

/// Fetches one word from an HTTP endpoint answering `?number=1` with `["word"]`
pub struct HttpWordProvider {
    client: Client,
    endpoint: String,
}

impl HttpWordProvider {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, WordProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RandomWordProvider for HttpWordProvider {
    async fn random_word(&self) -> Result<String, WordProviderError> {
        tracing::debug!("Requesting random word from {}", self.endpoint);

        let words: Vec<String> = self
            .client
            .get(&self.endpoint)
            .query(&[("number", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        words
            .into_iter()
            .next()
            .ok_or(WordProviderError::EmptyResponse)
    }
}
