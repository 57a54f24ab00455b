//! # Recommendation Service
//!
//! Wires the startup computation and the per-request operations together:
//!
//! **Startup (`build`)**
//! 1. Pivot the ratings into a `RatingMatrix`
//! 2. Compute the all-pairs `SimilarityMatrix`
//! 3. Rank the top-rated list once
//!
//! **Per request**
//! - `search`: fuzzy title candidates for free text
//! - `recommend`: the selected movie plus its nearest neighbors, with posters
//! - `top_rated`: the precomputed popularity list, with posters
//!
//! Everything built at startup is read-only afterwards. The only mutable
//! state is the poster cache, which is why the request methods that fetch
//! posters take `&mut self`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result as AnyResult};
use tracing::{info, instrument, warn};

use data_loader::{split_title_year, Catalog, Movie, MovieId};
use poster_client::{MetadataClient, OmdbClient, PosterCache, PosterLookup};
use similarity::{
    MeanPolicy, NeighborRanker, PopularMovie, PopularityRanker, RatingMatrix, SimilarityMatrix,
};
use title_resolver::{TitleMatch, TitleResolver};

use crate::config::Config;
use crate::error::{Result, ServiceError};

/// One movie as presented to the user
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub movie_id: MovieId,
    /// Catalog title, year suffix included
    pub title: String,
    pub year: Option<u16>,
    /// Similarity for neighbors, mean rating for top-rated entries
    pub score: Option<f32>,
    /// `None` when no poster could be resolved
    pub poster: Option<String>,
}

/// Answer to a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub selected: MovieCard,
    pub neighbors: Vec<MovieCard>,
}

pub struct RecommendationService<C> {
    catalog: Arc<Catalog>,
    ratings: RatingMatrix,
    neighbors: NeighborRanker,
    top_rated: Vec<PopularMovie>,
    resolver: TitleResolver,
    posters: PosterLookup<C>,
}

impl RecommendationService<OmdbClient> {
    /// Build a service backed by the OMDb client described in `config`
    pub fn from_config(
        catalog: Arc<Catalog>,
        config: &Config,
        mean_policy: MeanPolicy,
    ) -> AnyResult<Self> {
        let client = OmdbClient::new(
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
            config.poster_timeout(),
        )
        .context("Failed to create OMDb client")?;

        let posters = PosterLookup::new(client, PosterCache::new(config.poster_cache_capacity))
            .with_retries(config.poster_retries);

        let popularity = PopularityRanker::new()
            .with_min_rating_count(config.min_rating_count)
            .with_mean_policy(mean_policy);

        Ok(Self::build(catalog, posters, &popularity))
    }
}

impl<C: MetadataClient> RecommendationService<C> {
    /// Run the startup computation and assemble the service
    ///
    /// This is CPU-bound and runs once; the matrices are never rebuilt.
    #[instrument(skip_all)]
    pub fn build(catalog: Arc<Catalog>, posters: PosterLookup<C>, popularity: &PopularityRanker) -> Self {
        let start_time = Instant::now();

        let ratings = RatingMatrix::build(catalog.ratings());
        let (movies, users) = ratings.shape();
        info!(
            "Rating matrix: {} movies x {} users ({:?})",
            movies,
            users,
            start_time.elapsed()
        );

        let stage = Instant::now();
        let similarity = Arc::new(SimilarityMatrix::compute(&ratings));
        info!("Similarity matrix computed in {:?}", stage.elapsed());

        let stage = Instant::now();
        let top_rated = popularity.rank(&ratings);
        info!(
            "Ranked {} top-rated movies in {:?} (policy: {:?})",
            top_rated.len(),
            stage.elapsed(),
            popularity.mean_policy()
        );

        info!("Recommendation service ready in {:?}", start_time.elapsed());

        Self {
            catalog,
            ratings,
            neighbors: NeighborRanker::new(similarity),
            top_rated,
            resolver: TitleResolver::new(),
            posters,
        }
    }

    /// Replace the title resolver (builder pattern)
    pub fn with_resolver(mut self, resolver: TitleResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rating_matrix(&self) -> &RatingMatrix {
        &self.ratings
    }

    pub fn posters(&self) -> &PosterLookup<C> {
        &self.posters
    }

    /// Precomputed popularity ranking, without posters
    pub fn popular(&self) -> &[PopularMovie] {
        &self.top_rated
    }

    /// Fuzzy title candidates for `query`, best first
    pub fn search(&self, query: &str) -> Vec<TitleMatch> {
        self.resolver.resolve(query, self.catalog.titles())
    }

    /// The selected movie and its `k` nearest neighbors, posters attached
    #[instrument(skip(self))]
    pub async fn recommend(&mut self, movie_id: MovieId, k: usize) -> Result<Recommendations> {
        let catalog = Arc::clone(&self.catalog);
        let movie = catalog
            .get_movie(movie_id)
            .ok_or(ServiceError::MovieNotFound { movie_id })?;
        let ranked = self.neighbors.top_k(movie_id, k)?;

        let selected = Self::card(&mut self.posters, movie, None).await;

        let mut neighbors = Vec::with_capacity(ranked.len());
        for neighbor in ranked {
            match catalog.get_movie(neighbor.movie_id) {
                Some(m) => {
                    neighbors.push(Self::card(&mut self.posters, m, Some(neighbor.score)).await)
                }
                None => warn!("Neighbor {} has ratings but no catalog entry", neighbor.movie_id),
            }
        }

        info!("Recommended {} movies for {:?}", neighbors.len(), movie.title);
        Ok(Recommendations { selected, neighbors })
    }

    /// Like `recommend`, for an exact catalog title
    ///
    /// Duplicated titles resolve to the lowest movie id.
    pub async fn recommend_by_title(&mut self, title: &str, k: usize) -> Result<Recommendations> {
        let movie_id = self
            .catalog
            .find_by_title(title)
            .map(|m| m.id)
            .ok_or_else(|| ServiceError::TitleNotFound {
                title: title.to_string(),
            })?;
        self.recommend(movie_id, k).await
    }

    /// The top-rated list, posters attached
    pub async fn top_rated(&mut self) -> Vec<MovieCard> {
        let catalog = Arc::clone(&self.catalog);
        let mut cards = Vec::with_capacity(self.top_rated.len());
        for entry in &self.top_rated {
            if let Some(movie) = catalog.get_movie(entry.movie_id) {
                cards.push(Self::card(&mut self.posters, movie, Some(entry.mean_rating)).await);
            }
        }
        cards
    }

    async fn card(posters: &mut PosterLookup<C>, movie: &Movie, score: Option<f32>) -> MovieCard {
        let (title, year) = split_title_year(&movie.title);
        let poster = posters.poster_for(title, year).await;
        MovieCard {
            movie_id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            score,
            poster,
        }
    }
}
