//! Core domain types for the MovieLens "latest" dataset.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Enums for fixed sets of values
//! - An owning container (`Catalog`) whose getters hand out borrows

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user (1-610 in ml-latest-small)
pub type UserId = u32;

/// Unique identifier for a movie (sparse, up to ~193k in ml-latest-small)
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Title as it appears in movies.csv, year included: "Toy Story (1995)"
    pub title: String,
    /// Year extracted from title
    ///
    /// `None` when the title carries no parenthesised year
    pub year: Option<u16>,
    pub genres: Vec<Genre>,
}

/// Movie genres from MovieLens
///
/// The "latest" datasets use 19 genres plus a marker for unlabelled movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Imax,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
    NoGenresListed,
}

// =============================================================================
// Rating Type
// =============================================================================

/// Represents a single rating from a user for a movie
///
/// Small and `Copy`: the matrix builder reads these by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, half-star steps from 0.5 to 5.0
    pub rating: f32,
    /// Unix timestamp when rating was made
    pub timestamp: i64,
}

// =============================================================================
// Catalog - the loaded dataset
// =============================================================================

/// Owns every movie and rating loaded at startup.
///
/// Movies keep their file order, which is the order candidates are offered in
/// when scores tie. Titles are not unique in MovieLens, so the title index maps
/// each title to every movie id that carries it.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) positions: HashMap<MovieId, usize>,
    pub(crate) title_index: HashMap<String, Vec<MovieId>>,
    pub(crate) ratings: Vec<Rating>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already parsed records
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        let mut catalog = Self::new();
        for movie in movies {
            catalog.insert_movie(movie);
        }
        for rating in ratings {
            catalog.insert_rating(rating);
        }
        catalog
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Look up a movie by its exact title
    ///
    /// When the title is duplicated, the lowest movie id wins.
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.title_index
            .get(title)
            .and_then(|ids| ids.iter().min())
            .and_then(|&id| self.get_movie(id))
    }

    /// Every movie id carrying this exact title, ascending
    pub fn ids_for_title(&self, title: &str) -> &[MovieId] {
        self.title_index
            .get(title)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All movies in file order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// `(id, title)` pairs in file order, the shape the title resolver consumes
    pub fn titles(&self) -> impl Iterator<Item = (MovieId, &str)> + '_ {
        self.movies.iter().map(|m| (m.id, m.title.as_str()))
    }

    /// All ratings in file order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Titles that appear on more than one movie, sorted
    pub fn duplicate_titles(&self) -> Vec<(&str, &[MovieId])> {
        let mut dups: Vec<(&str, &[MovieId])> = self
            .title_index
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(title, ids)| (title.as_str(), ids.as_slice()))
            .collect();
        dups.sort_by(|a, b| a.0.cmp(b.0));
        dups
    }

    /// Insert a movie and index its title
    ///
    /// Re-inserting an existing id replaces the stored movie.
    pub fn insert_movie(&mut self, movie: Movie) {
        if let Some(&pos) = self.positions.get(&movie.id) {
            let old_title = std::mem::take(&mut self.movies[pos].title);
            if let Some(ids) = self.title_index.get_mut(&old_title) {
                ids.retain(|&id| id != movie.id);
                if ids.is_empty() {
                    self.title_index.remove(&old_title);
                }
            }
            self.index_title(&movie);
            self.movies[pos] = movie;
        } else {
            self.index_title(&movie);
            self.positions.insert(movie.id, self.movies.len());
            self.movies.push(movie);
        }
    }

    fn index_title(&mut self, movie: &Movie) {
        let ids = self.title_index.entry(movie.title.clone()).or_default();
        ids.push(movie.id);
        ids.sort_unstable();
    }

    /// Insert a rating
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Get counts for debugging/validation: (movies, ratings)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}
