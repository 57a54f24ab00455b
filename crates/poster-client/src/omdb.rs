//! OMDb metadata client.
//!
//! One request per lookup: `GET {base_url}?apikey=..&t=<title>[&y=<year>]`.
//! Only two fields of the JSON answer are read:
//!
//! ```json
//! { "Response": "True", "Poster": "https://m.media-amazon.com/images/..." }
//! ```
//!
//! `Response: "False"` or `Poster: "N/A"` both mean "no poster".

use crate::error::{PosterError, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

/// Timeout applied to every request unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The slice of an OMDb answer we consume
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OmdbResponse {
    /// "True" or "False"
    #[serde(rename = "Response")]
    pub response: String,

    /// Image URL, or the literal "N/A"
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl OmdbResponse {
    /// The poster URL, if the service found the movie and has a poster for it
    pub fn poster_url(&self) -> Option<&str> {
        if self.response != "True" {
            return None;
        }
        match self.poster.as_deref() {
            Some(url) if !url.is_empty() && url != "N/A" => Some(url),
            _ => None,
        }
    }
}

/// Anything that can answer a title (+ optional year) metadata query.
///
/// `OmdbClient` is the production implementation; tests substitute doubles.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn fetch(&self, title: &str, year: Option<&str>) -> Result<OmdbResponse>;
}

/// reqwest-backed OMDb client
#[derive(Clone)]
pub struct OmdbClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key stays out of logs
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataClient for OmdbClient {
    async fn fetch(&self, title: &str, year: Option<&str>) -> Result<OmdbResponse> {
        let mut params = vec![("apikey", self.api_key.as_str()), ("t", title)];
        if let Some(year) = year {
            params.push(("y", year));
        }

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PosterError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: OmdbResponse = serde_json::from_str(&body)?;
        debug!(title, response = %parsed.response, "OMDb answered");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OmdbResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_found_poster() {
        let resp = parse(r#"{"Title":"Heat","Year":"1995","Poster":"https://img/heat.jpg","Response":"True"}"#);
        assert_eq!(resp.poster_url(), Some("https://img/heat.jpg"));
    }

    #[test]
    fn test_na_poster() {
        let resp = parse(r#"{"Title":"Obscure","Poster":"N/A","Response":"True"}"#);
        assert_eq!(resp.poster_url(), None);
    }

    #[test]
    fn test_movie_not_found() {
        let resp = parse(r#"{"Response":"False","Error":"Movie not found!"}"#);
        assert_eq!(resp.poster, None);
        assert_eq!(resp.poster_url(), None);
    }

    #[test]
    fn test_unexpected_shape_is_decode_error() {
        let err = serde_json::from_str::<OmdbResponse>(r#"{"Poster":"x"}"#).unwrap_err();
        assert!(matches!(PosterError::from(err), PosterError::Decode(_)));
    }
}
