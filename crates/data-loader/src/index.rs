//! Catalog loading and validation.
//!
//! - Parse movies.csv and ratings.csv side by side
//! - Build the catalog (file order kept, titles indexed)
//! - Validate that ratings only reference known movies and sit in range

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

/// Smallest and largest rating values accepted by `validate`
///
/// Zero is excluded: the rating matrix uses 0.0 to mean "not rated".
pub const MIN_RATING: f32 = 0.0;
pub const MAX_RATING: f32 = 5.0;

impl Catalog {
    /// Load the MovieLens dataset from a directory
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse both files (movies, ratings) in parallel
    /// 2. Build the catalog
    /// 3. Report duplicate titles
    /// 4. Validate data integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading MovieLens dataset from {:?}", data_dir);

        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");

        // Rayon's `join` runs the two parsers on separate threads and waits for both
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!("Loaded {} movies, {} ratings", movies.len(), ratings.len());

        let catalog = Catalog::from_parts(movies, ratings);

        for (title, ids) in catalog.duplicate_titles() {
            warn!(title, ?ids, "Duplicate title in catalog; exact lookups use the lowest id");
        }

        catalog.validate()?;

        info!("Catalog successfully built and validated");
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - All rating.movie_id references exist in movies
    /// - Ratings are in valid range (0.0 exclusive - 5.0 inclusive)
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !self.positions.contains_key(&rating.movie_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if !rating.rating.is_finite() || rating.rating <= MIN_RATING || rating.rating > MAX_RATING {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}
