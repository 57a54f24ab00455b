//! Fuzzy title resolution for free-text movie queries.
//!
//! This crate provides:
//! - Scorer trait and implementations (edit-distance and token based)
//! - TitleResolver for ranking catalog titles against a query
//!
//! ## Example Usage
//! ```ignore
//! use title_resolver::TitleResolver;
//!
//! let resolver = TitleResolver::new();
//! let matches = resolver.resolve("toy stroy", catalog.titles());
//! if matches.is_empty() {
//!     println!("No similar movie found.");
//! }
//! ```

pub mod traits;
pub mod normalize;
pub mod scorers;
pub mod resolver;

// Re-export main types
pub use traits::Scorer;
pub use normalize::normalize;
pub use resolver::{TitleMatch, TitleResolver, DEFAULT_MATCH_LIMIT, DEFAULT_SCORE_CUTOFF};
