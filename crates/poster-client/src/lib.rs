//! Poster lookup against the OMDb metadata service.
//!
//! This crate provides:
//! - `OmdbClient`, a reqwest client with a bounded per-request timeout
//! - `PosterCache`, an explicit LRU memo keyed by title
//! - `PosterLookup`, which combines the two and retries once before giving up
//!
//! Failures never escape `PosterLookup`: an unresolved poster is `None`.
//!
//! ## Example Usage
//! ```ignore
//! use poster_client::{OmdbClient, PosterCache, PosterLookup, DEFAULT_OMDB_URL, DEFAULT_TIMEOUT};
//!
//! let client = OmdbClient::new(api_key, DEFAULT_OMDB_URL, DEFAULT_TIMEOUT)?;
//! let mut posters = PosterLookup::new(client, PosterCache::default());
//!
//! let url = posters.poster_for("Heat", Some("1995")).await;
//! ```

pub mod error;
pub mod omdb;
pub mod cache;
pub mod lookup;

pub use error::{PosterError, Result};
pub use omdb::{MetadataClient, OmdbClient, OmdbResponse, DEFAULT_OMDB_URL, DEFAULT_TIMEOUT};
pub use cache::{PosterCache, PosterEntry, DEFAULT_CACHE_CAPACITY};
pub use lookup::{PosterLookup, DEFAULT_RETRIES};
