//! Whole-string and best-substring edit-distance scores.

use crate::traits::Scorer;

/// Normalised Levenshtein similarity scaled to 0-100
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best `ratio` between the shorter string and every equally long window of
/// the longer one.
///
/// "story" against "toy story 1995" scores 100.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (short, short_len, long) = if a_len <= b_len { (a, a_len, b) } else { (b, b_len, a) };

    if short_len == 0 {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let long_chars: Vec<char> = long.chars().collect();
    if long_chars.len() == short_len {
        return ratio(short, long);
    }

    let mut best = 0.0f64;
    let mut window = String::with_capacity(short.len());
    for chars in long_chars.windows(short_len) {
        window.clear();
        window.extend(chars.iter());
        best = best.max(ratio(short, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Plain edit-distance scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratio;

impl Scorer for Ratio {
    fn name(&self) -> &str {
        "Ratio"
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        ratio(query, candidate)
    }
}

/// Substring-tolerant scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Scorer for PartialRatio {
    fn name(&self) -> &str {
        "PartialRatio"
    }

    fn score(&self, query: &str, candidate: &str) -> f64 {
        partial_ratio(query, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("heat", "heat"), 100.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert!((ratio("heat", "heap") - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_ratio() {
        assert_eq!(partial_ratio("story", "toy story 1995"), 100.0);
        assert_eq!(partial_ratio("toy story 1995", "story"), 100.0);
        assert_eq!(partial_ratio("", "anything"), 0.0);
        assert_eq!(partial_ratio("", ""), 100.0);
        assert!(partial_ratio("stroy", "toy story 1995") < 100.0);
    }
}
