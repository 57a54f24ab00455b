//! Recoverable errors surfaced by the recommendation service.
//!
//! The CLI renders each of these as an empty state, never as a crash.

use data_loader::MovieId;
use similarity::SimilarityError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Not in the catalog, or in the catalog but never rated
    #[error("Movie {movie_id} not found")]
    MovieNotFound { movie_id: MovieId },

    /// No catalog entry carries this exact title
    #[error("No movie titled {title:?}")]
    TitleNotFound { title: String },
}

impl From<SimilarityError> for ServiceError {
    fn from(err: SimilarityError) -> Self {
        match err {
            SimilarityError::MovieNotFound { movie_id } => ServiceError::MovieNotFound { movie_id },
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
