//! Rating Matrix Builder
//!
//! Pivots the flat `(movie, user, rating)` relation into a dense
//! movie × user matrix:
//!
//! ```text
//!            user 1  user 2  user 7
//! movie 1  [   4.0     0.0     5.0 ]
//! movie 3  [   0.0     3.5     0.0 ]
//! ```
//!
//! Rows are movies in ascending id order, columns are users in ascending id
//! order, and 0.0 marks a missing rating. The `RowIndex` built here is the
//! only place that maps a movie id to a row position; everything downstream
//! borrows it (or shares it through an `Arc`) instead of re-deriving it.

use data_loader::{MovieId, Rating, UserId};
use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Two-way mapping between ids and positions along one matrix axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdIndex {
    ids: Vec<u32>,
    positions: HashMap<u32, usize>,
}

/// Movie id <-> row position
pub type RowIndex = IdIndex;

/// User id <-> column position
pub type ColumnIndex = IdIndex;

impl IdIndex {
    /// Build an index over the distinct ids, in ascending order
    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut ids: Vec<u32> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        Self { ids, positions }
    }

    /// Position of an id along the axis
    pub fn position(&self, id: u32) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Id stored at a position
    pub fn id_at(&self, position: usize) -> Option<u32> {
        self.ids.get(position).copied()
    }

    /// All ids in position order
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Dense movie × user rating matrix
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    rows: Arc<RowIndex>,
    columns: ColumnIndex,
    values: Array2<f32>,
}

impl RatingMatrix {
    /// Pivot ratings into a dense matrix
    ///
    /// If the same user rated the same movie twice, the later rating in
    /// input order wins. An empty input yields a 0 × 0 matrix.
    #[instrument(skip(ratings), fields(ratings = ratings.len()))]
    pub fn build(ratings: &[Rating]) -> Self {
        let rows = RowIndex::from_ids(ratings.iter().map(|r| r.movie_id));
        let columns = ColumnIndex::from_ids(ratings.iter().map(|r| r.user_id));

        let mut values = Array2::<f32>::zeros((rows.len(), columns.len()));
        let mut overwritten = 0usize;

        for rating in ratings {
            if let (Some(row), Some(col)) = (rows.position(rating.movie_id), columns.position(rating.user_id)) {
                let cell = &mut values[[row, col]];
                if *cell != 0.0 {
                    overwritten += 1;
                }
                *cell = rating.rating;
            }
        }

        if overwritten > 0 {
            debug!(overwritten, "Repeated (movie, user) pairs; kept the later rating");
        }
        info!(
            movies = rows.len(),
            users = columns.len(),
            "Built rating matrix"
        );

        Self {
            rows: Arc::new(rows),
            columns,
            values,
        }
    }

    /// Shared movie id <-> row mapping
    pub fn row_index(&self) -> &Arc<RowIndex> {
        &self.rows
    }

    /// User id <-> column mapping
    pub fn column_index(&self) -> &ColumnIndex {
        &self.columns
    }

    /// The rating vector of one movie across all users
    pub fn row(&self, movie_id: MovieId) -> Option<ArrayView1<'_, f32>> {
        self.rows.position(movie_id).map(|pos| self.values.row(pos))
    }

    /// A single cell; 0.0 when the user never rated the movie
    pub fn rating(&self, movie_id: MovieId, user_id: UserId) -> Option<f32> {
        let row = self.rows.position(movie_id)?;
        let col = self.columns.position(user_id)?;
        Some(self.values[[row, col]])
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// (movies, users)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: 1000000,
        }
    }

    #[test]
    fn test_pivot_fills_missing_with_zero() {
        let ratings = vec![
            rating(7, 3, 4.0),
            rating(1, 1, 5.0),
            rating(7, 1, 2.5),
        ];

        let matrix = RatingMatrix::build(&ratings);

        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix.row_index().ids(), &[1, 3]);
        assert_eq!(matrix.column_index().ids(), &[1, 7]);
        assert_eq!(matrix.rating(1, 1), Some(5.0));
        assert_eq!(matrix.rating(1, 7), Some(2.5));
        assert_eq!(matrix.rating(3, 1), Some(0.0));
        assert_eq!(matrix.rating(3, 7), Some(4.0));
    }

    #[test]
    fn test_row_order_is_ascending_movie_id() {
        let ratings = vec![rating(1, 50, 1.0), rating(1, 2, 1.0), rating(1, 9, 1.0)];
        let matrix = RatingMatrix::build(&ratings);

        let rows = matrix.row_index();
        assert_eq!(rows.ids(), &[2, 9, 50]);
        assert_eq!(rows.position(9), Some(1));
        assert_eq!(rows.id_at(2), Some(50));
        assert_eq!(rows.position(4), None);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let ratings = vec![rating(1, 1, 2.0), rating(1, 1, 4.5)];
        let matrix = RatingMatrix::build(&ratings);
        assert_eq!(matrix.rating(1, 1), Some(4.5));
    }

    #[test]
    fn test_empty_input() {
        let matrix = RatingMatrix::build(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.shape(), (0, 0));
        assert!(matrix.row(1).is_none());
    }
}
