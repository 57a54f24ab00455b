//! Neighbor Ranker - top-K most similar movies
//!
//! Reads one row of the `SimilarityMatrix`, drops the query movie's own
//! column, and keeps the K highest scores. The sort is stable, so equal
//! scores come out in ascending row position (ascending movie id).

use crate::cosine::SimilarityMatrix;
use crate::error::Result;
use data_loader::MovieId;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of neighbors returned when the caller does not choose
pub const DEFAULT_NEIGHBOR_COUNT: usize = 5;

/// One ranked neighbor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub movie_id: MovieId,
    pub score: f32,
}

/// Ranks neighbors against a shared, precomputed similarity matrix
#[derive(Debug, Clone)]
pub struct NeighborRanker {
    /// Shared reference to the similarity matrix (read-only, so no Mutex needed)
    similarity: Arc<SimilarityMatrix>,
}

impl NeighborRanker {
    pub fn new(similarity: Arc<SimilarityMatrix>) -> Self {
        Self { similarity }
    }

    /// Up to `k` movies most similar to `movie_id`, best first
    ///
    /// Fails with `MovieNotFound` when the movie has no row.
    #[instrument(skip(self))]
    pub fn top_k(&self, movie_id: MovieId, k: usize) -> Result<Vec<Neighbor>> {
        let index = self.similarity.position(movie_id)?;
        let rows = self.similarity.row_index();

        let mut scored: Vec<(usize, f32)> = match self.similarity.row(index) {
            Some(row) => row
                .iter()
                .copied()
                .enumerate()
                .filter(|&(j, _)| j != index)
                .collect(),
            None => Vec::new(),
        };

        // `sort_by` is stable; ties keep ascending row order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        let neighbors: Vec<Neighbor> = scored
            .into_iter()
            .filter_map(|(j, score)| rows.id_at(j).map(|id| Neighbor { movie_id: id, score }))
            .collect();

        debug!("Ranked {} neighbors for movie {}", neighbors.len(), movie_id);
        Ok(neighbors)
    }
}
