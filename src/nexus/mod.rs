//! NEXUS alignment parser, DATA block writer and analysis block templates.
//!
//! This module provides:
//! - [NexusParserBuilder] / [NexusParser] - for reading the MATRIX block of a NEXUS file
//! - [parse_format_line] - for reading a FORMAT declaration
//! - [TreesBlock], [PaupBlock], [MrBayesBlock] and [append_block] - for appending
//!   analysis blocks to a NEXUS file
//!
//! Writing an alignment as NEXUS goes through [crate::writer] with
//! [AlignmentFormat::Nexus](crate::writer::AlignmentFormat::Nexus).
//!
//! # Quick API
//! For simple use cases with default settings:
//! - [`parse_file`] - parses a file, returns its [`Alignment`]
//!
//! # Format
//! The parser does not validate NEXUS syntax. It only needs:
//! - A line containing `FORMAT DATATYPE = <type> GAP = <gap> MISSING = <missing> Interleave = <bool>;`
//!   (optional; metadata stays blank without it)
//! - A line containing `MATRIX`, followed by one record per line, up to a line
//!   containing `END;`
//!
//! ## Assumptions
//! * Markers are matched case-sensitively anywhere in a line
//! * Blank lines are ignored everywhere
//! * A record is `<label><two or more spaces or a tab><sequence>`:
//!   - Single spaces inside a label become underscores
//!   - Whitespace inside a sequence is removed
//! * The matrix terminator `;` is either on its own line or glued to the last record
//! * Interleaved matrices are not merged: a label seen again replaces the
//!   earlier sequence (last write wins)

pub(crate) mod defs;
mod blocks;
mod format_line;
mod parser;
mod writer;

pub use self::blocks::{
    append_block, extract_newick, find_tree_line, AnalysisBlock, Method, MrBayesBlock, PaupBlock, Rooting,
    Statistics, TreesBlock,
};
pub use self::format_line::parse_format_line;
pub use self::parser::{GapHandling, NexusParser, NexusParserBuilder};
pub(crate) use self::writer::write_nexus_matrix;

use crate::model::Alignment;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (public)
// ============================================================================
/// Parses the MATRIX block of a NEXUS file with default settings
/// (gaps removed, sequences uppercased) and returns its [`Alignment`].
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Errors
/// Returns an error if the file cannot be read or a MATRIX record is malformed.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Alignment, ParsingError> {
    let parser = NexusParserBuilder::for_file(path)?.build()?;
    Ok(parser.into_alignment())
}
