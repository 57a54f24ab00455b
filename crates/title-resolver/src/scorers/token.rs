//! Token-based scores: word order and repeated words stop mattering.

use crate::scorers::ratio::{partial_ratio, ratio};
use crate::traits::Scorer;
use std::collections::BTreeSet;

fn tokens(s: &str) -> BTreeSet<&str> {
    s.split_whitespace().collect()
}

fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts.into_iter().collect::<Vec<_>>().join(" ")
}

/// `ratio` after sorting the words of both strings
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let mut a_tokens: Vec<&str> = a.split_whitespace().collect();
    let mut b_tokens: Vec<&str> = b.split_whitespace().collect();
    a_tokens.sort_unstable();
    b_tokens.sort_unstable();
    ratio(&a_tokens.join(" "), &b_tokens.join(" "))
}

/// Compare the shared words against each side's full word set
///
/// When one side's words are a subset of the other's, the score is 100:
/// "matrix" against "the matrix 1999".
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let a_tokens = tokens(a);
    let b_tokens = tokens(b);
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let intersection = join(a_tokens.intersection(&b_tokens).copied());
    let a_only = join(a_tokens.difference(&b_tokens).copied());
    let b_only = join(b_tokens.difference(&a_tokens).copied());

    if !intersection.is_empty() && (a_only.is_empty() || b_only.is_empty()) {
        return 100.0;
    }

    let combine = |rest: &str| {
        if intersection.is_empty() {
            rest.to_string()
        } else {
            format!("{intersection} {rest}")
        }
    };
    let a_combined = combine(&a_only);
    let b_combined = combine(&b_only);

    ratio(&intersection, &a_combined)
        .max(ratio(&intersection, &b_combined))
        .max(ratio(&a_combined, &b_combined))
}

/// `partial_ratio` over words: 100 as soon as one word is shared, otherwise
/// the partial match of the sorted words.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let a_tokens = tokens(a);
    let b_tokens = tokens(b);
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }
    if !a_tokens.is_disjoint(&b_tokens) {
        return 100.0;
    }

    partial_ratio(&join(a_tokens.iter().copied()), &join(b_tokens.iter().copied()))
}

/// Word-order-insensitive scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

impl Scorer for TokenSortRatio {
    fn name(&self) -> &str {
        "TokenSortRatio"
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        token_sort_ratio(query, candidate)
    }
}

/// Subset-tolerant word scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl Scorer for TokenSetRatio {
    fn name(&self) -> &str {
        "TokenSetRatio"
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        token_set_ratio(query, candidate)
    }
}
