//! The TitleResolver ranks catalog titles against a free-text query.

use crate::normalize::normalize;
use crate::scorers::WeightedRatio;
use crate::traits::Scorer;
use data_loader::MovieId;
use tracing::{debug, instrument};

/// Candidates offered for one query
pub const DEFAULT_MATCH_LIMIT: usize = 5;

/// Candidates scoring below this (0-100) are dropped
pub const DEFAULT_SCORE_CUTOFF: f64 = 60.0;

/// One fuzzy-match candidate
///
/// Carries the movie id so that duplicated titles stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
}

/// Maps free text to catalog titles by approximate matching.
///
/// ## Usage
/// ```ignore
/// let resolver = TitleResolver::new()
///     .with_limit(5)
///     .with_score_cutoff(60.0);
///
/// let matches = resolver.resolve("toy story", catalog.titles());
/// ```
pub struct TitleResolver {
    scorer: Box<dyn Scorer>,
    limit: usize,
    score_cutoff: f64,
}

impl TitleResolver {
    /// Resolver with the weighted scorer, limit 5 and cutoff 60
    pub fn new() -> Self {
        Self {
            scorer: Box::new(WeightedRatio),
            limit: DEFAULT_MATCH_LIMIT,
            score_cutoff: DEFAULT_SCORE_CUTOFF,
        }
    }

    /// Replace the scorer (builder pattern)
    pub fn with_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Configure how many candidates are returned (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Configure the minimum score, 0-100 (default: 60)
    pub fn with_score_cutoff(mut self, cutoff: f64) -> Self {
        self.score_cutoff = cutoff;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn score_cutoff(&self) -> f64 {
        self.score_cutoff
    }

    /// Rank `choices` against `query`, best first.
    ///
    /// Equal scores keep the order of `choices`. Returns an empty vec when the
    /// query is blank or nothing reaches the cutoff.
    #[instrument(skip(self, choices), fields(scorer = self.scorer.name()))]
    pub fn resolve<'a, I>(&self, query: &str, choices: I) -> Vec<TitleMatch>
    where
        I: IntoIterator<Item = (MovieId, &'a str)>,
    {
        let query = normalize(query);
        if query.is_empty() || self.limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<TitleMatch> = choices
            .into_iter()
            .filter_map(|(movie_id, title)| {
                let score = self.scorer.score(&query, &normalize(title));
                (score >= self.score_cutoff).then(|| TitleMatch {
                    movie_id,
                    title: title.to_string(),
                    score,
                })
            })
            .collect();

        debug!("{} candidates cleared cutoff {}", matches.len(), self.score_cutoff);

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(self.limit);
        matches
    }

    /// The single best candidate, if any clears the cutoff
    pub fn best_match<'a, I>(&self, query: &str, choices: I) -> Option<TitleMatch>
    where
        I: IntoIterator<Item = (MovieId, &'a str)>,
    {
        self.resolve(query, choices).into_iter().next()
    }
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new()
    }
}
