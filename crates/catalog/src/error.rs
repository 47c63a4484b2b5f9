//! Error types for the catalog crate.
//!
//! Loading a catalog can fail at three levels: the file itself (missing or
//! unreadable), the JSON inside it, or an individual offering whose values
//! make no sense (negative price, rating out of range).

use thiserror::Error;

/// Errors that can occur while loading, parsing or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON document (or one JSON line) couldn't be parsed
    ///
    /// `line` is 0 when the whole file is a single JSON array and serde did
    /// not report a position.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// An offering field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The catalog source is reachable but refused to produce a snapshot
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
