//! Similarity Engine
//!
//! All-pairs cosine similarity between the movie rows of a `RatingMatrix`.
//!
//! ## Algorithm
//! 1. Normalise every row to unit length, O(M·U). Zero rows stay zero.
//! 2. Multiply the normalised matrix by its transpose: `S = N · Nᵀ`.
//! 3. Clamp to [-1, 1], mirror the upper triangle so `S[i][j] == S[j][i]`
//!    holds exactly, and pin the diagonal to 1.0.
//!
//! A movie nobody rated has a zero vector; its cosine with anything is
//! undefined, so it scores 0.0 against every other row and 1.0 against itself.

use crate::error::{Result, SimilarityError};
use crate::matrix::{RatingMatrix, RowIndex};
use data_loader::MovieId;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView1, Axis};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Cosine of the angle between two vectors
///
/// Returns 0.0 when either vector has zero length.
pub fn cosine_similarity(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "Vectors must have same dimension (got {} and {})",
        a.len(),
        b.len()
    );

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Square, symmetric movie × movie similarity matrix
///
/// Row `i` corresponds to the same movie as row `i` of the `RatingMatrix` it
/// was computed from; both hold the same `Arc<RowIndex>`.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Arc<RowIndex>,
    scores: Array2<f32>,
}

impl SimilarityMatrix {
    /// Compute the full similarity matrix
    #[instrument(skip(ratings), fields(movies = ratings.shape().0, users = ratings.shape().1))]
    pub fn compute(ratings: &RatingMatrix) -> Self {
        let start = Instant::now();

        let mut normalized = ratings.values().to_owned();
        normalized
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                let norm = row.dot(&row).sqrt();
                if norm > 0.0 {
                    row.mapv_inplace(|v| v / norm);
                }
            });

        let mut scores = normalized.dot(&normalized.t());

        let n = scores.nrows();
        for i in 0..n {
            scores[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let s = scores[[i, j]].clamp(-1.0, 1.0);
                scores[[i, j]] = s;
                scores[[j, i]] = s;
            }
        }

        info!(movies = n, elapsed = ?start.elapsed(), "Computed similarity matrix");

        Self {
            rows: Arc::clone(ratings.row_index()),
            scores,
        }
    }

    /// Similarity between the movies at two row positions
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.scores.get([i, j]).copied()
    }

    /// Similarity between two movies by id
    pub fn score_between(&self, a: MovieId, b: MovieId) -> Result<f32> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Ok(self.scores[[i, j]])
    }

    /// One row of scores, indexed by row position
    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, f32>> {
        (i < self.scores.nrows()).then(|| self.scores.row(i))
    }

    /// Row position of a movie
    pub fn position(&self, movie_id: MovieId) -> Result<usize> {
        self.rows
            .position(movie_id)
            .ok_or(SimilarityError::MovieNotFound { movie_id })
    }

    pub fn row_index(&self) -> &Arc<RowIndex> {
        &self.rows
    }

    pub fn scores(&self) -> &Array2<f32> {
        &self.scores
    }

    /// Number of movies (rows)
    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Rating, UserId};
    use ndarray::arr1;

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: 1000000,
        }
    }

    fn create_test_ratings() -> Vec<Rating> {
        vec![
            // Movies 1 and 2: identical vectors
            rating(1, 1, 4.0),
            rating(2, 1, 3.0),
            rating(1, 2, 4.0),
            rating(2, 2, 3.0),
            // Movie 3: partially overlapping
            rating(2, 3, 5.0),
            rating(3, 3, 1.0),
            // Movie 4: disjoint users
            rating(4, 4, 2.0),
            rating(5, 4, 4.5),
        ]
    }

    #[test]
    fn test_cosine_similarity() {
        let a = arr1(&[1.0f32, 0.0, 1.0]);
        let b = arr1(&[1.0f32, 0.0, 1.0]);
        let c = arr1(&[0.0f32, 1.0, 0.0]);
        let zero = arr1(&[0.0f32, 0.0, 0.0]);

        assert!((cosine_similarity(a.view(), b.view()) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(a.view(), c.view()), 0.0);
        assert_eq!(cosine_similarity(a.view(), zero.view()), 0.0);
    }

    #[test]
    fn test_diagonal_is_one_and_matrix_symmetric() {
        let matrix = RatingMatrix::build(&create_test_ratings());
        let sim = SimilarityMatrix::compute(&matrix);

        assert_eq!(sim.len(), 4);
        for i in 0..sim.len() {
            assert_eq!(sim.score(i, i), Some(1.0));
            for j in 0..sim.len() {
                assert_eq!(sim.score(i, j), sim.score(j, i));
            }
        }
    }

    #[test]
    fn test_identical_rows_score_one() {
        let matrix = RatingMatrix::build(&create_test_ratings());
        let sim = SimilarityMatrix::compute(&matrix);

        let score = sim.score_between(1, 2).unwrap();
        assert!((score - 1.0).abs() < 1e-6, "got {score}");
    }

    #[test]
    fn test_disjoint_rows_score_zero() {
        let matrix = RatingMatrix::build(&create_test_ratings());
        let sim = SimilarityMatrix::compute(&matrix);

        assert_eq!(sim.score_between(1, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_matches_pairwise_formula() {
        let matrix = RatingMatrix::build(&create_test_ratings());
        let sim = SimilarityMatrix::compute(&matrix);

        let expected = cosine_similarity(matrix.row(1).unwrap(), matrix.row(3).unwrap());
        let actual = sim.score_between(1, 3).unwrap();
        assert!((expected - actual).abs() < 1e-6);
        assert!(actual > 0.0 && actual < 1.0);
    }

    #[test]
    fn test_zero_norm_row() {
        // A row that only holds a zero rating behaves like an unrated movie
        let mut ratings = create_test_ratings();
        ratings.push(rating(1, 9, 0.0));
        let matrix = RatingMatrix::build(&ratings);
        let sim = SimilarityMatrix::compute(&matrix);

        let row = sim.position(9).unwrap();
        for j in 0..sim.len() {
            let expected = if j == row { 1.0 } else { 0.0 };
            assert_eq!(sim.score(row, j), Some(expected));
        }
    }

    #[test]
    fn test_shares_row_index_with_rating_matrix() {
        let matrix = RatingMatrix::build(&create_test_ratings());
        let sim = SimilarityMatrix::compute(&matrix);

        assert!(Arc::ptr_eq(sim.row_index(), matrix.row_index()));
        for (i, &movie_id) in matrix.row_index().ids().iter().enumerate() {
            assert_eq!(sim.position(movie_id), Ok(i));
        }
    }

    #[test]
    fn test_unknown_movie() {
        let matrix = RatingMatrix::build(&create_test_ratings());
        let sim = SimilarityMatrix::compute(&matrix);

        assert_eq!(
            sim.score_between(1, 42),
            Err(SimilarityError::MovieNotFound { movie_id: 42 })
        );
    }

    #[test]
    fn test_empty_matrix() {
        let sim = SimilarityMatrix::compute(&RatingMatrix::build(&[]));
        assert!(sim.is_empty());
        assert!(sim.row(0).is_none());
    }
}
