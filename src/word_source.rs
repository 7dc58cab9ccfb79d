//! Secret word resolution: remote word service first, local list second.

use crate::wordbank::{FALLBACK_WORDS, default_wordbank};
use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_WORD_URL: &str = "https://random-word-api.herokuapp.com/word?number=1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Could not build HTTP client: {0}")]
    Client(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Word service answered with status {0}")]
    Status(u16),
    #[error("Malformed word list: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Word service returned an empty list")]
    EmptyList,
    #[error("Word service returned a blank word")]
    BlankWord,
    #[error("Word service returned a non-string entry")]
    NotAWord,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Settings for the remote word service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WORD_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Pick the secret word out of a word service response body.
///
/// The body must be a JSON array whose first entry is a string; later
/// entries are not inspected.
pub fn parse_word_list(body: &str) -> Result<String, FetchError> {
    let words: Vec<Value> = serde_json::from_str(body)?;
    let first = words.first().ok_or(FetchError::EmptyList)?;
    let word = first
        .as_str()
        .ok_or(FetchError::NotAWord)?
        .trim()
        .to_lowercase();
    if word.is_empty() {
        return Err(FetchError::BlankWord);
    }
    Ok(word)
}

pub trait WordFetcher {
    fn fetch(&self) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher. Blocks the caller for at most the configured timeout.
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

impl WordFetcher for HttpFetcher {
    fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text()?;
        parse_word_list(&body)
    }
}

/// Anything that can hand a fresh secret word to a round.
pub trait SecretSource {
    fn resolve(&mut self) -> String;
}

pub struct WordSource {
    fetcher: Option<Box<dyn WordFetcher>>,
    fallback: Vec<String>,
}

impl WordSource {
    /// A source that tries `fetcher` before picking from `fallback`.
    ///
    /// An empty fallback list is replaced by the built-in words.
    pub fn new(fetcher: Option<Box<dyn WordFetcher>>, fallback: Vec<String>) -> Self {
        let fallback: Vec<String> = fallback
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let fallback = if fallback.is_empty() {
            log::warn!("Fallback word list is empty, using built-in words");
            default_wordbank()
        } else {
            fallback
        };
        Self { fetcher, fallback }
    }

    /// Build an HTTP-backed source. A client that fails to build leaves the
    /// source offline rather than failing startup.
    pub fn from_config(config: &SourceConfig, fallback: Vec<String>) -> Self {
        let fetcher: Option<Box<dyn WordFetcher>> = match HttpFetcher::new(config) {
            Ok(fetcher) => Some(Box::new(fetcher)),
            Err(e) => {
                log::warn!("{e}; running offline");
                None
            }
        };
        Self::new(fetcher, fallback)
    }

    pub fn offline(fallback: Vec<String>) -> Self {
        Self::new(None, fallback)
    }

    pub fn fallback_words(&self) -> &[String] {
        &self.fallback
    }

    pub fn is_offline(&self) -> bool {
        self.fetcher.is_none()
    }

    fn pick_fallback(&self) -> String {
        let mut rng = rand::thread_rng();
        // `new` guarantees a non-empty list.
        let word = self
            .fallback
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_WORDS[0].to_string());
        log::info!("Falling back to local word list. Selected word: {word}");
        word
    }
}

impl SecretSource for WordSource {
    fn resolve(&mut self) -> String {
        let Some(fetcher) = &self.fetcher else {
            return self.pick_fallback();
        };
        match fetcher.fetch() {
            Ok(word) => {
                log::info!("Fetched secret word from word service");
                word
            }
            Err(e) => {
                log::warn!("Word service error: {e}");
                self.pick_fallback()
            }
        }
    }
}
