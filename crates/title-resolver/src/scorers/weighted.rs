//! Weighted blend of the other scorers, the default for title search.
//!
//! ## Algorithm
//! 1. Similar lengths (longer < 1.5x shorter): best of `ratio` and the token
//!    scores scaled by 0.95.
//! 2. Otherwise substring matches count too: `partial_ratio` scaled by 0.9
//!    (0.6 when one string is 8x longer) and `partial_token_ratio` scaled by
//!    0.95 and the same factor.
//!
//! Only an exact match reaches 100.

use crate::scorers::ratio::{partial_ratio, ratio};
use crate::scorers::token::{partial_token_ratio, token_set_ratio, token_sort_ratio};
use crate::traits::Scorer;

const TOKEN_SCALE: f64 = 0.95;

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl Scorer for WeightedRatio {
    fn name(&self) -> &str {
        "WeightedRatio"
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query_len = query.chars().count();
        let candidate_len = candidate.chars().count();
        if query_len == 0 || candidate_len == 0 {
            return 0.0;
        }

        let base = ratio(query, candidate);
        let len_ratio = query_len.max(candidate_len) as f64 / query_len.min(candidate_len) as f64;

        if len_ratio < 1.5 {
            let token = token_sort_ratio(query, candidate).max(token_set_ratio(query, candidate));
            return base.max(token * TOKEN_SCALE);
        }

        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        let partial = partial_ratio(query, candidate) * partial_scale;
        let partial_token = partial_token_ratio(query, candidate) * TOKEN_SCALE * partial_scale;

        base.max(partial).max(partial_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_maximal() {
        assert_eq!(WeightedRatio.score("toy story 1995", "toy story 1995"), 100.0);
    }

    #[test]
    fn test_prefix_query_scores_high() {
        let score = WeightedRatio.score("toy story", "toy story 1995");
        assert!(score >= 85.0 && score < 100.0, "got {score}");
    }

    #[test]
    fn test_single_letter_query() {
        assert!((WeightedRatio.score("a", "a 1994") - 90.0).abs() < 1e-9);
        assert!(WeightedRatio.score("a", "b 1995") < 60.0);
    }

    #[test]
    fn test_reordered_words() {
        let score = WeightedRatio.score("president american the 1995", "american president the 1995");
        assert!(score >= 95.0 - 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(WeightedRatio.score("", "heat 1995"), 0.0);
    }
}
