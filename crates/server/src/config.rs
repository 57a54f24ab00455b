//! Runtime configuration, read from the environment at startup.
//!
//! A `.env` file in the working directory is honoured (via dotenvy) but real
//! environment variables take precedence. `OMDB_API_KEY` is the only required
//! value; startup fails without it.

use poster_client::{DEFAULT_CACHE_CAPACITY, DEFAULT_OMDB_URL, DEFAULT_RETRIES};
use serde::Deserialize;
use similarity::DEFAULT_MIN_RATING_COUNT;
use std::time::Duration;
use thiserror::Error;

/// Shown in place of posters the metadata service could not resolve
pub const DEFAULT_FALLBACK_POSTER_URL: &str =
    "https://ih1.redbubble.net/image.1027712254.9762/fposter,small,wall_texture,product,750x1000.u2.jpg";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Env(#[from] envy::Error),

    #[error("OMDB_API_KEY is set but empty")]
    EmptyApiKey,
}

/// Application configuration loaded from environment variables
#[derive(Deserialize, Clone)]
pub struct Config {
    /// OMDb API key (secret)
    pub omdb_api_key: String,

    /// OMDb base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Per-request timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Extra attempts after a failed poster request
    #[serde(default = "default_poster_retries")]
    pub poster_retries: u32,

    /// Poster cache size (LRU entries)
    #[serde(default = "default_poster_cache_capacity")]
    pub poster_cache_capacity: usize,

    /// Image rendered when no poster could be resolved
    #[serde(default = "default_fallback_poster_url")]
    pub fallback_poster_url: String,

    /// Minimum ratings for a movie to enter the top-rated list
    #[serde(default = "default_min_rating_count")]
    pub min_rating_count: usize,
}

fn default_omdb_api_url() -> String {
    DEFAULT_OMDB_URL.to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_poster_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_fallback_poster_url() -> String {
    DEFAULT_FALLBACK_POSTER_URL.to_string()
}

fn default_min_rating_count() -> usize {
    DEFAULT_MIN_RATING_COUNT
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        let config: Config = envy::from_iter(vars)?;
        if config.omdb_api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(config)
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("omdb_api_key", &"<redacted>")
            .field("omdb_api_url", &self.omdb_api_url)
            .field("poster_timeout_secs", &self.poster_timeout_secs)
            .field("poster_retries", &self.poster_retries)
            .field("poster_cache_capacity", &self.poster_cache_capacity)
            .field("fallback_poster_url", &self.fallback_poster_url)
            .field("min_rating_count", &self.min_rating_count)
            .finish()
    }
}
