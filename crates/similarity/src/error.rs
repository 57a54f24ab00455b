//! Error types for the similarity crate.

use data_loader::MovieId;
use thiserror::Error;

/// Errors raised by lookups against the precomputed matrices
///
/// These are recoverable: a caller typically renders an empty state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    /// The movie has no row (absent from the catalog, or never rated)
    #[error("Movie {movie_id} has no row in the rating matrix")]
    MovieNotFound { movie_id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SimilarityError>;
