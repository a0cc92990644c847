use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use hangman_core::ControllerSettings;
use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Fixed origin for share links, overriding the page's own origin
    pub public_origin: Option<String>,
    pub random_word_url: String,
    pub random_word_timeout_seconds: u64,
    pub dictionary_url: String,
    pub assets_dir: PathBuf,
    pub copied_indicator_millis: u64,
    pub connection_timeout_seconds: u64,
    pub rate_limit_max_messages: u32,
    pub rate_limit_refill_millis: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let public_origin = match lookup("PUBLIC_ORIGIN") {
            Some(origin) if !is_web_origin(&origin) => {
                return Err(ConfigError::Invalid {
                    name: "PUBLIC_ORIGIN",
                    value: origin,
                });
            }
            origin => origin,
        };

        let config = Self {
            host: parse_var(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_var(&lookup, "PORT", 8080)?,
            public_origin,
            random_word_url: lookup("RANDOM_WORD_URL")
                .unwrap_or_else(|| "https://random-word-api.herokuapp.com/word".to_string()),
            random_word_timeout_seconds: parse_var(&lookup, "RANDOM_WORD_TIMEOUT_SECONDS", 5)?,
            dictionary_url: lookup("DICTIONARY_URL")
                .unwrap_or_else(|| hangman_core::DEFAULT_DICTIONARY_URL.to_string()),
            assets_dir: lookup("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./public/hangman")),
            copied_indicator_millis: parse_var(&lookup, "COPIED_INDICATOR_MILLIS", 2000)?,
            connection_timeout_seconds: parse_var(&lookup, "CONNECTION_TIMEOUT_SECONDS", 300)?,
            rate_limit_max_messages: parse_var(&lookup, "RATE_LIMIT_MAX_MESSAGES", 30)?,
            rate_limit_refill_millis: parse_var(&lookup, "RATE_LIMIT_REFILL_MILLIS", 500)?,
        };
        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// PUBLIC_ORIGIN if set, else the origin the page was loaded from, else the bind address
    pub fn share_origin(&self, page_origin: Option<&str>) -> String {
        if let Some(origin) = &self.public_origin {
            return origin.clone();
        }
        match page_origin.filter(|origin| is_web_origin(origin)) {
            Some(origin) => origin.to_string(),
            None => format!("http://{}", self.bind_addr()),
        }
    }

    pub fn controller_settings(&self, page_origin: Option<&str>) -> ControllerSettings {
        ControllerSettings {
            share_origin: self.share_origin(page_origin),
            dictionary_url: self.dictionary_url.clone(),
        }
    }

    pub fn copied_indicator_duration(&self) -> Duration {
        Duration::from_millis(self.copied_indicator_millis)
    }

    pub fn random_word_timeout(&self) -> Duration {
        Duration::from_secs(self.random_word_timeout_seconds)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_seconds)
    }

    pub fn rate_limit_refill(&self) -> Duration {
        Duration::from_millis(self.rate_limit_refill_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None).expect("default config is valid")
    }
}

// Browsers send "null" for opaque origins such as file:// pages
fn is_web_origin(origin: &str) -> bool {
    Url::parse(origin)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
