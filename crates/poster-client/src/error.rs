//! Errors from the poster metadata service.
//!
//! None of these reach the presentation layer: `PosterLookup` logs them and
//! reports the poster as unresolved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    /// Connection, timeout or body read failure
    #[error("Poster service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("Poster service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not the expected JSON shape
    #[error("Invalid response from poster service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PosterError {
    /// Whether the same request may succeed if sent again
    ///
    /// Transport failures and 5xx answers are transient. A 4xx answer or an
    /// undecodable body will not change on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            PosterError::Http(_) => true,
            PosterError::Status { status, .. } => *status >= 500,
            PosterError::Decode(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PosterError>;
