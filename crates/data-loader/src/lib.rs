//! # Data Loader Crate
//!
//! This crate handles loading the MovieLens "latest" dataset (the
//! `ml-latest-small` layout: `movies.csv` + `ratings.csv`).
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Genre, Catalog)
//! - **parser**: Parse the CSV files into Rust structs, title/year helpers
//! - **index**: Load, assemble and validate the Catalog
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_files(Path::new("data/ml-latest-small"))?;
//!
//! let movie = catalog.find_by_title("Toy Story (1995)").unwrap();
//! println!("{} has id {}", movie.title, movie.id);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::split_title_year;
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    Catalog,
    // Enums
    Genre,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year: None,
            genres: vec![],
        }
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert_eq!(catalog.counts(), (0, 0));
    }

    #[test]
    fn test_insert_movie() {
        let mut catalog = Catalog::new();

        catalog.insert_movie(Movie {
            id: 1,
            title: "Toy Story (1995)".to_string(),
            year: Some(1995),
            genres: vec![Genre::Animation, Genre::Children, Genre::Comedy],
        });

        let retrieved = catalog.get_movie(1).unwrap();
        assert_eq!(retrieved.id, 1);
        assert_eq!(retrieved.year, Some(1995));
        assert_eq!(retrieved.genres.len(), 3);
        assert_eq!(catalog.find_by_title("Toy Story (1995)").unwrap().id, 1);
    }

    #[test]
    fn test_reinsert_replaces_title() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(movie(1, "Old (1990)"));
        catalog.insert_movie(movie(1, "New (1990)"));

        assert_eq!(catalog.counts(), (1, 0));
        assert!(catalog.find_by_title("Old (1990)").is_none());
        assert_eq!(catalog.find_by_title("New (1990)").unwrap().id, 1);
    }

    #[test]
    fn test_duplicate_titles_lowest_id_wins() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(movie(838, "Emma (1996)"));
        catalog.insert_movie(movie(26958, "Emma (1996)"));
        catalog.insert_movie(movie(5, "Heat (1995)"));

        assert_eq!(catalog.find_by_title("Emma (1996)").unwrap().id, 838);
        assert_eq!(catalog.ids_for_title("Emma (1996)"), &[838, 26958]);

        let dups = catalog.duplicate_titles();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].0, "Emma (1996)");
    }

    #[test]
    fn test_titles_keep_file_order() {
        let catalog = Catalog::from_parts(
            vec![movie(3, "C (1996)"), movie(1, "A (1994)"), movie(2, "B (1995)")],
            vec![],
        );
        let ids: Vec<MovieId> = catalog.titles().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        assert!(catalog.get_movie(999).is_none());
        assert!(catalog.find_by_title("Nothing (2000)").is_none());
        assert!(catalog.ids_for_title("Nothing (2000)").is_empty());
        assert!(catalog.ratings().is_empty());
    }
}
