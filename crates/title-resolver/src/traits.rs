//! Core trait for fuzzy title scoring.
//!
//! A `Scorer` compares a query against one candidate title. The
//! `TitleResolver` runs one scorer over the whole catalog, so swapping the
//! scorer changes the matching behaviour without touching ranking.

/// Scores how well a candidate matches a query, on a 0-100 scale.
///
/// `Send + Sync` so a resolver can be shared across threads.
pub trait Scorer: Send + Sync {
    /// Returns the name of this scorer (for logging/debugging)
    fn name(&self) -> &str;

    /// Score a pre-processed query against a pre-processed candidate.
    ///
    /// Both inputs have already been through `normalize`. 100.0 means the
    /// strings are equal; 0.0 means nothing in common.
    fn score(&self, query: &str, candidate: &str) -> f64;
}
