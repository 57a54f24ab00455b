//! PosterLookup - cached, retrying poster resolution.
//!
//! ## Algorithm
//! 1. Cache hit: return the stored answer, no network call
//! 2. Miss: ask the metadata client, up to `1 + retries` attempts
//! 3. Store the first definitive answer and return it. A 4xx status or an
//!    undecodable body counts as definitive: stored as missing, no retry
//! 4. Every attempt failed transiently: log and return `None` (not cached)
//!
//! `None` means "no poster to show"; choosing a placeholder image is up to
//! the caller.

use crate::cache::{PosterCache, PosterEntry};
use crate::omdb::MetadataClient;
use tracing::{debug, instrument, warn};

/// Extra attempts after the first failed request
pub const DEFAULT_RETRIES: u32 = 1;

pub struct PosterLookup<C> {
    client: C,
    cache: PosterCache,
    retries: u32,
}

impl<C: MetadataClient> PosterLookup<C> {
    pub fn new(client: C, cache: PosterCache) -> Self {
        Self {
            client,
            cache,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Configure extra attempts after a failed request (default: 1)
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Resolve the poster URL for a year-stripped title
    #[instrument(skip(self))]
    pub async fn poster_for(&mut self, title: &str, year: Option<&str>) -> Option<String> {
        if let Some(entry) = self.cache.get(title) {
            debug!("Poster cache hit");
            return entry.url().map(str::to_string);
        }

        let attempts = self.retries.saturating_add(1);
        for attempt in 1..=attempts {
            match self.client.fetch(title, year).await {
                Ok(response) => {
                    let entry = match response.poster_url() {
                        Some(url) => PosterEntry::Found(url.to_string()),
                        None => PosterEntry::Missing,
                    };
                    let url = entry.url().map(str::to_string);
                    self.cache.insert(title, entry);
                    return url;
                }
                Err(e) if e.is_transient() => {
                    warn!(attempt, attempts, error = %e, "Poster request failed");
                }
                Err(e) => {
                    warn!(error = %e, "Poster service gave an unusable answer; caching as missing");
                    self.cache.insert(title, PosterEntry::Missing);
                    return None;
                }
            }
        }
        None
    }

    pub fn cache(&self) -> &PosterCache {
        &self.cache
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PosterError, Result};
    use crate::omdb::OmdbResponse;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays scripted answers and counts calls
    struct ScriptedClient {
        calls: AtomicUsize,
        script: Mutex<VecDeque<Result<OmdbResponse>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<OmdbResponse>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                script: Mutex::new(script.into()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataClient for ScriptedClient {
        async fn fetch(&self, _title: &str, _year: Option<&str>) -> Result<OmdbResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(unavailable()))
        }
    }

    fn found(url: &str) -> Result<OmdbResponse> {
        Ok(OmdbResponse {
            response: "True".to_string(),
            poster: Some(url.to_string()),
        })
    }

    fn not_found() -> Result<OmdbResponse> {
        Ok(OmdbResponse {
            response: "False".to_string(),
            poster: None,
        })
    }

    fn unavailable() -> PosterError {
        PosterError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let client = ScriptedClient::new(vec![found("https://img/heat.jpg")]);
        let mut lookup = PosterLookup::new(client, PosterCache::default());

        let first = lookup.poster_for("Heat", Some("1995")).await;
        let second = lookup.poster_for("Heat", Some("1995")).await;

        assert_eq!(first.as_deref(), Some("https://img/heat.jpg"));
        assert_eq!(first, second);
        assert_eq!(lookup.client().calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_poster_is_cached() {
        let client = ScriptedClient::new(vec![not_found()]);
        let mut lookup = PosterLookup::new(client, PosterCache::default());

        assert_eq!(lookup.poster_for("Obscure", None).await, None);
        assert_eq!(lookup.poster_for("Obscure", None).await, None);
        assert_eq!(lookup.client().calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_transient_failure() {
        let client = ScriptedClient::new(vec![Err(unavailable()), found("https://img/casino.jpg")]);
        let mut lookup = PosterLookup::new(client, PosterCache::default());

        let poster = lookup.poster_for("Casino", Some("1995")).await;

        assert_eq!(poster.as_deref(), Some("https://img/casino.jpg"));
        assert_eq!(lookup.client().calls(), 2);
    }

    #[tokio::test]
    async fn test_persistent_failure_is_not_cached() {
        let client = ScriptedClient::new(vec![
            Err(unavailable()),
            Err(unavailable()),
            found("https://img/late.jpg"),
        ]);
        let mut lookup = PosterLookup::new(client, PosterCache::default());

        assert_eq!(lookup.poster_for("Late", None).await, None);
        assert_eq!(lookup.client().calls(), 2);
        assert!(!lookup.cache().contains("Late"));

        // A later interaction tries again and succeeds
        assert_eq!(
            lookup.poster_for("Late", None).await.as_deref(),
            Some("https://img/late.jpg")
        );
        assert_eq!(lookup.client().calls(), 3);
    }

    fn bad_shape() -> PosterError {
        PosterError::from(serde_json::from_str::<OmdbResponse>(r#"{"Poster":"x"}"#).unwrap_err())
    }

    #[tokio::test]
    async fn test_undecodable_answer_is_cached_as_missing() {
        let client = ScriptedClient::new(vec![Err(bad_shape()), Err(bad_shape()), Err(bad_shape())]);
        let mut lookup = PosterLookup::new(client, PosterCache::default());

        for _ in 0..3 {
            assert_eq!(lookup.poster_for("Heat", Some("1995")).await, None);
        }

        assert_eq!(lookup.client().calls(), 1);
        assert_eq!(lookup.cache().len(), 1);
        assert!(lookup.cache().contains("Heat"));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let rejected = PosterError::Status {
            status: 401,
            body: "Invalid API key!".to_string(),
        };
        let client = ScriptedClient::new(vec![Err(rejected), found("https://img/never.jpg")]);
        let mut lookup = PosterLookup::new(client, PosterCache::default());

        assert_eq!(lookup.poster_for("Heat", None).await, None);
        assert_eq!(lookup.poster_for("Heat", None).await, None);
        assert_eq!(lookup.client().calls(), 1);
    }

    #[tokio::test]
    async fn test_no_retries() {
        let client = ScriptedClient::new(vec![Err(unavailable()), found("https://img/x.jpg")]);
        let mut lookup = PosterLookup::new(client, PosterCache::default()).with_retries(0);

        assert_eq!(lookup.poster_for("X", None).await, None);
        assert_eq!(lookup.client().calls(), 1);
    }
}
