//! # Similarity Crate
//!
//! The numeric core of the recommender: everything that is computed once at
//! startup from the rating table and then only read.
//!
//! ## Components
//!
//! ### Rating Matrix Builder (`matrix`)
//! Pivots ratings into a dense movie × user matrix and owns the
//! movie id <-> row mapping.
//!
//! ### Similarity Engine (`cosine`)
//! All-pairs cosine similarity between movie rows.
//!
//! ### Neighbor Ranker (`neighbors`)
//! Top-K most similar movies for a query movie.
//!
//! ### Popularity Ranker (`popularity`)
//! Mean rating and rating count per movie, thresholded and ranked.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{NeighborRanker, PopularityRanker, RatingMatrix, SimilarityMatrix};
//! use std::sync::Arc;
//!
//! let matrix = RatingMatrix::build(catalog.ratings());
//! let similarity = Arc::new(SimilarityMatrix::compute(&matrix));
//!
//! let ranker = NeighborRanker::new(similarity.clone());
//! let neighbors = ranker.top_k(1, 5)?;
//!
//! let top_rated = PopularityRanker::new().rank(&matrix);
//! ```

// Public modules
pub mod error;
pub mod matrix;
pub mod cosine;
pub mod neighbors;
pub mod popularity;

// Re-export commonly used types
pub use error::{Result, SimilarityError};
pub use matrix::{ColumnIndex, IdIndex, RatingMatrix, RowIndex};
pub use cosine::{cosine_similarity, SimilarityMatrix};
pub use neighbors::{Neighbor, NeighborRanker, DEFAULT_NEIGHBOR_COUNT};
pub use popularity::{
    MeanPolicy, PopularMovie, PopularityRanker, DEFAULT_MIN_RATING_COUNT, DEFAULT_POPULAR_LIMIT,
};
