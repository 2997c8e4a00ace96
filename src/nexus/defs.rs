//! NEXUS format constants and definitions.
//!
//! This module contains the literal tokens used to locate the alignment in a
//! NEXUS file and the byte string constants used when writing NEXUS blocks.

// Tokens matched (case-sensitive, anywhere in a line) while parsing
/// Marker of the FORMAT declaration line
pub(crate) const FORMAT_MARKER: &str = "FORMAT DATATYPE";

/// Marker of the line opening the MATRIX command
pub(crate) const MATRIX_MARKER: &str = "MATRIX";

/// Marker of the line closing the DATA block
pub(crate) const END_MARKER: &str = "END;";

/// Matrix terminator some writers put on a line of its own
pub(crate) const MATRIX_TERMINATOR: &str = ";";

/// Prefix of a tree definition line
pub(crate) const TREE_PREFIX: &str = "tree ";

// Keywords written
/// NEXUS file header "#NEXUS"
pub(crate) const NEXUS_HEADER: &[u8] = b"#NEXUS";

/// NEXUS block begin keyword "BEGIN"
pub(crate) const BLOCK_BEGIN: &[u8] = b"BEGIN";

/// NEXUS block end keyword "END;" (with semicolon)
pub(crate) const BLOCK_END: &[u8] = b"END;";

/// DATA block identifier "DATA;" (with semicolon)
pub(crate) const DATA: &[u8] = b"DATA;";

/// TREES block identifier "TREES;" (with semicolon)
pub(crate) const TREES: &[u8] = b"TREES;";

/// PAUP block identifier "PAUP;" (with semicolon)
pub(crate) const PAUP: &[u8] = b"PAUP;";

/// MrBayes block identifier "MRBAYES;" (with semicolon)
pub(crate) const MRBAYES: &[u8] = b"MRBAYES;";

/// DATA block dimensions keyword "DIMENSIONS"
pub(crate) const DIMENSIONS: &[u8] = b"DIMENSIONS";

/// Number of taxa parameter "NTAX"
pub(crate) const NTAX: &[u8] = b"NTAX";

/// Number of characters parameter "NCHAR"
pub(crate) const NCHAR: &[u8] = b"NCHAR";

/// Matrix command "MATRIX"
pub(crate) const MATRIX: &[u8] = b"MATRIX";

/// Individual tree declaration keyword "tree"
pub(crate) const TREE: &[u8] = b"tree";

/// Width added to the longest label when padding MATRIX/PHYLIP rows
pub(crate) const LABEL_PADDING: usize = 10;

/// Character used to pad sequences up to NCHAR
pub(crate) const PAD_CHAR: char = '-';
