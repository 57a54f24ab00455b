//! Scorer implementations.
//!
//! All scores are on a 0-100 scale and expect normalised input. The building
//! block is `ratio`: normalised Levenshtein similarity from `strsim`.

pub mod ratio;
pub mod token;
pub mod weighted;

// Re-export for convenience
pub use ratio::{partial_ratio, ratio, PartialRatio, Ratio};
pub use token::{partial_token_ratio, token_set_ratio, token_sort_ratio, TokenSetRatio, TokenSortRatio};
pub use weighted::WeightedRatio;
