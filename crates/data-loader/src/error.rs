//! Error types for the data-loader crate.
//!
//! Every variant here is fatal: a dataset that fails to load stops the
//! process at startup with the diagnostic carried by the error.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
///
/// The `#[derive(Error)]` macro from thiserror implements `Display` from the
/// `#[error(...)]` attributes, so the message is what the user sees on exit.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV reader hit an I/O failure while reading the file
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Record in data file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
