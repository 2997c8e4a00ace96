//! Error types for the NEXUS alignment parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading a MATRIX block, a FORMAT
//! declaration or a tree definition line.

use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 60;


// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur during NEXUS parsing.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Malformed MATRIX record - cannot split into label and sequence")]
    MalformedRecord,
    #[error("Invalid FORMAT line - {0}")]
    InvalidFormatLine(String),
    #[error("Invalid tree line - no Newick string found")]
    InvalidTreeLine,
}


// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (line number and offending text).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at line {line}{}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    line: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type, the 1-based line number
    /// and the offending line (truncated for the report).
    pub fn at_line(kind: ParsingErrorType, line: usize, text: &str) -> Self {
        Self {
            kind,
            line,
            context: text.chars().take(DEFAULT_CONTEXT_LENGTH).collect(),
        }
    }

    /// Convenience constructor for MalformedRecord
    pub fn malformed_record(line: usize, text: &str) -> Self {
        Self::at_line(ParsingErrorType::MalformedRecord, line, text)
    }

    /// Convenience constructor for InvalidFormatLine
    pub fn invalid_format_line(line: usize, text: &str, msg: String) -> Self {
        Self::at_line(ParsingErrorType::InvalidFormatLine(msg), line, text)
    }

    /// Convenience constructor for InvalidTreeLine
    pub fn invalid_tree_line(line: usize, text: &str) -> Self {
        Self::at_line(ParsingErrorType::InvalidTreeLine, line, text)
    }

    /// Create a ParsingError without line context
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self { kind, line: 0, context: String::new() }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the line (1-based) where the error occurred, 0 if unknown
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the offending text
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns the same error with its line number replaced.
    pub(crate) fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context: {context}")
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        // No line for IO errors
        ParsingError::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
