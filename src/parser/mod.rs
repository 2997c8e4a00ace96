//! Supporting infrastructure for parsing NEXUS alignment files.
//!
//! This module provides error handling for the parser and the label and
//! record-line utilities shared by the parser and the transform pipeline.

pub mod parsing_error;
pub mod utils;

pub use parsing_error::{ParsingError, ParsingErrorType};
