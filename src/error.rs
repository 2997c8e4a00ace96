//! Error type for conversions and block appending.

use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nexalign operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum Error {
    /// Input could not be parsed (e.g. a MATRIX record without a sequence)
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// Substring bounds are invalid after conversion to a 0-based range
    #[error("Invalid range {start}..{end}: {reason}")]
    InvalidRange {
        /// Requested 1-based start
        start: i64,
        /// Requested 1-based end
        end: i64,
        /// Why the range was rejected
        reason: String,
    },

    /// Output file could not be created
    #[error("Cannot open destination {}: {source}", .path.display())]
    UnopenableDestination {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Fetch pattern could not be compiled
    #[error("Invalid fetch filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    /// A block template needs a tree definition the target file lacks
    #[error("No tree definition line found in {}", .0.display())]
    MissingTree(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
