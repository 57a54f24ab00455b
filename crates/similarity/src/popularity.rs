//! Popularity Ranker - "Top Rated Movies"
//!
//! For each movie row: rating count (non-zero cells) and mean rating, then
//! filter by a minimum count and rank by mean, best first.
//!
//! ## Mean policy
//! `MeanPolicy::AllColumns` averages across every user column, unrated cells
//! included as 0.0. That deflates the mean of sparsely rated movies in
//! proportion to the user count, and is the default. `MeanPolicy::ObservedOnly`
//! averages only the ratings that exist.

use crate::matrix::RatingMatrix;
use data_loader::MovieId;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Movies need at least this many ratings to be ranked
pub const DEFAULT_MIN_RATING_COUNT: usize = 50;

/// Length of the ranked list
pub const DEFAULT_POPULAR_LIMIT: usize = 10;

/// How the mean rating of a row is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeanPolicy {
    /// Sum of the row divided by the number of user columns
    #[default]
    AllColumns,
    /// Sum of the row divided by the number of ratings it holds
    ObservedOnly,
}

/// Aggregate rating statistics for one movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularMovie {
    pub movie_id: MovieId,
    pub mean_rating: f32,
    pub rating_count: usize,
}

/// Ranks movies by mean rating among those with enough ratings
#[derive(Debug, Clone)]
pub struct PopularityRanker {
    min_rating_count: usize,
    limit: usize,
    mean_policy: MeanPolicy,
}

impl PopularityRanker {
    pub fn new() -> Self {
        Self {
            min_rating_count: DEFAULT_MIN_RATING_COUNT,
            limit: DEFAULT_POPULAR_LIMIT,
            mean_policy: MeanPolicy::default(),
        }
    }

    /// Configure the minimum rating count (default: 50)
    pub fn with_min_rating_count(mut self, count: usize) -> Self {
        self.min_rating_count = count;
        self
    }

    /// Configure how many movies are returned (default: 10)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Configure the mean policy (default: `AllColumns`)
    pub fn with_mean_policy(mut self, policy: MeanPolicy) -> Self {
        self.mean_policy = policy;
        self
    }

    pub fn mean_policy(&self) -> MeanPolicy {
        self.mean_policy
    }

    /// Statistics for every row, in row order
    pub fn stats(&self, matrix: &RatingMatrix) -> Vec<PopularMovie> {
        let values = matrix.values();
        let rows = matrix.row_index();
        let users = values.ncols();

        (0..values.nrows())
            .into_par_iter()
            .map(|i| {
                let row = values.row(i);
                let rating_count = row.iter().filter(|&&v| v != 0.0).count();
                let total: f32 = row.sum();
                let denominator = match self.mean_policy {
                    MeanPolicy::AllColumns => users,
                    MeanPolicy::ObservedOnly => rating_count,
                };
                let mean_rating = if denominator > 0 {
                    total / denominator as f32
                } else {
                    0.0
                };

                PopularMovie {
                    movie_id: rows.id_at(i).unwrap_or_default(),
                    mean_rating,
                    rating_count,
                }
            })
            .collect()
    }

    /// Movies with at least `min_rating_count` ratings, best mean first
    ///
    /// Equal means keep ascending movie id order.
    #[instrument(skip(self, matrix), fields(policy = ?self.mean_policy))]
    pub fn rank(&self, matrix: &RatingMatrix) -> Vec<PopularMovie> {
        let mut ranked: Vec<PopularMovie> = self
            .stats(matrix)
            .into_iter()
            .filter(|m| m.rating_count >= self.min_rating_count)
            .collect();

        debug!(
            "{} movies have at least {} ratings",
            ranked.len(),
            self.min_rating_count
        );

        ranked.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));
        ranked.truncate(self.limit);
        ranked
    }
}

impl Default for PopularityRanker {
    fn default() -> Self {
        Self::new()
    }
}
