//! Parser for MovieLens "latest" CSV files.
//!
//! This module handles parsing the two CSV files:
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//!
//! Titles that contain commas are quoted (`"American President, The (1995)"`),
//! so parsing goes through the `csv` crate instead of a plain `split(',')`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// Raw row of movies.csv before genres and year are interpreted
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    genres: String,
}

/// Raw row of ratings.csv
#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f32,
    timestamp: i64,
}

/// Open a CSV file, turning a missing file into `FileNotFound`
fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Convert a csv error into our error type, keeping the line it happened on
fn csv_error(file: &str, err: csv::Error) -> DataLoadError {
    if err.is_io_error() {
        return DataLoadError::CsvError {
            file: file.to_string(),
            source: err,
        };
    }
    DataLoadError::ParseError {
        file: file.to_string(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

/// Read every record of a CSV file into `T`, calling `convert` on each row
///
/// `convert` receives the 1-based line number so it can report its own errors.
fn read_records<R, T, F>(path: &Path, mut convert: F) -> Result<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
    F: FnMut(R, u64) -> Result<T>,
{
    let file = file_label(path);
    let mut reader = open_csv(path)?;
    let headers = reader.headers().map_err(|e| csv_error(&file, e))?.clone();

    let mut out = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(&file, e))?
    {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: R = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(&file, e))?;
        out.push(convert(row, line)?);
    }
    Ok(out)
}

/// Parse the movies.csv file
///
/// Format: movieId,title,genres
///
/// The title includes the year in parentheses: "Toy Story (1995)"
/// Genres are pipe-separated: "Adventure|Animation|Children|Comedy|Fantasy"
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = file_label(path);
    read_records(path, |record: MovieRecord, line| {
        let genres = parse_genres(&record.genres).map_err(|e| DataLoadError::ParseError {
            file: file.clone(),
            line,
            reason: e.to_string(),
        })?;

        Ok(Movie {
            id: record.movie_id,
            year: extract_year_from_title(&record.title),
            title: record.title,
            genres,
        })
    })
}

/// Parse the ratings.csv file
///
/// Format: userId,movieId,rating,timestamp
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    read_records(path, |record: RatingRecord, _line| {
        Ok(Rating {
            user_id: record.user_id,
            movie_id: record.movie_id,
            rating: record.rating,
            timestamp: record.timestamp,
        })
    })
}

/// Extract year from movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
pub fn extract_year_from_title(title: &str) -> Option<u16> {
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        let year_str = title[start + 1..end].trim();
        if let Ok(year) = year_str.parse::<u16>() {
            return Some(year);
        }
    }
    None
}

/// Split a catalog title into the bare title and the text of its last
/// parenthesised group.
///
/// Example: "Heat (1995)" -> ("Heat", Some("1995"))
///          "Seven (a.k.a. Se7en) (1995)" -> ("Seven (a.k.a. Se7en)", Some("1995"))
///          "Babylon 5" -> ("Babylon 5", None)
///
/// The bare title is the poster lookup key; the second part is sent as the
/// year hint.
pub fn split_title_year(title: &str) -> (&str, Option<&str>) {
    if !title.contains(')') {
        return (title.trim(), None);
    }
    match title.rsplit_once('(') {
        Some((head, tail)) => {
            let year = tail.trim().trim_end_matches(')').trim();
            let year = if year.is_empty() { None } else { Some(year) };
            (head.trim(), year)
        }
        None => (title.trim(), None),
    }
}

/// Parse a genre string into Genre enum
///
/// Example: "Action" -> Ok(Genre::Action)
///          "Sci-Fi" -> Ok(Genre::SciFi)
fn parse_genre(s: &str) -> Result<Genre> {
    match s {
        "Action" => Ok(Genre::Action),
        "Adventure" => Ok(Genre::Adventure),
        "Animation" => Ok(Genre::Animation),
        // MovieLens 1M spells it "Children's"
        "Children" | "Children's" => Ok(Genre::Children),
        "Comedy" => Ok(Genre::Comedy),
        "Crime" => Ok(Genre::Crime),
        "Documentary" => Ok(Genre::Documentary),
        "Drama" => Ok(Genre::Drama),
        "Fantasy" => Ok(Genre::Fantasy),
        "Film-Noir" => Ok(Genre::FilmNoir),
        "Horror" => Ok(Genre::Horror),
        "IMAX" => Ok(Genre::Imax),
        "Musical" => Ok(Genre::Musical),
        "Mystery" => Ok(Genre::Mystery),
        "Romance" => Ok(Genre::Romance),
        "Sci-Fi" => Ok(Genre::SciFi),
        "Thriller" => Ok(Genre::Thriller),
        "War" => Ok(Genre::War),
        "Western" => Ok(Genre::Western),
        "(no genres listed)" => Ok(Genre::NoGenresListed),
        _ => Err(DataLoadError::InvalidValue {
            field: "genre".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parse pipe-separated genres
///
/// Example: "Action|Adventure|Sci-Fi" -> vec![Genre::Action, Genre::Adventure, Genre::SciFi]
fn parse_genres(s: &str) -> Result<Vec<Genre>> {
    s.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(parse_genre)
        .collect()
}
