//! Nexalign is a library (and command-line tool) to convert the alignment of
//! a NEXUS file to FASTA, PHYLIP, MEGA or a fresh NEXUS DATA block, and to
//! append TREES, PAUP and MrBayes blocks to NEXUS files.
//!
//! Core functionality provided:
//! - Parser: Locates the FORMAT declaration and the MATRIX block of a NEXUS
//!   file and reads each record into an ordered label → sequence [Alignment].
//! - Transforms: Ambiguity collapse, substring extraction (inverted bounds
//!   give the reverse complement), reverse complement, label cleanup and
//!   line wrapping. See [crate::transform].
//! - Writers: NEXUS, FASTA, sequential PHYLIP and MEGA, each in three output
//!   modes: combined, split (one file per record) and subset (records whose
//!   label matches a filter). See [crate::writer].
//! - Blocks: TREES blocks from single-tree files, PAUP and MrBayes command
//!   templates. See [crate::nexus].
//!
//! Limitations:
//! - Whole files are read into memory
//! - Interleaved matrices are not merged
//! - No validation of NEXUS syntax beyond locating the MATRIX block
//!
//! # Usage patterns
//! 1. [parse_nexus_file] and [convert] give quick access with default settings.
//! 2. Configure a [NexusParserBuilder](crate::nexus::NexusParserBuilder),
//!    a [TransformConfig](crate::transform::TransformConfig) and an
//!    [AlignmentWriter](crate::writer::AlignmentWriter) for full control.
//!
//! ## Example Default Configuration
//! ```no_run
//! use nexalign::parse_nexus_file;
//!
//! let alignment = parse_nexus_file("primates.nex").unwrap();
//! println!("{} taxa", alignment.num_records());
//! ```
//!
//! ## Example Configuration
//! ```no_run
//! use nexalign::nexus::NexusParserBuilder;
//! use nexalign::transform::{self, SubstringSpec, TransformConfig};
//! use nexalign::writer::{AlignmentFormat, AlignmentWriter, Destination, OutputMode, WriteOptions};
//!
//! let alignment = NexusParserBuilder::for_file("primates.nex")?
//!     .keep_gaps()
//!     .build()?
//!     .into_alignment();
//!
//! // Reverse complement of positions 1..300
//! let config = TransformConfig::default().with_substring(SubstringSpec::new(300, 1));
//! let alignment = transform::apply(alignment, &config)?;
//!
//! let writer = AlignmentWriter::new(AlignmentFormat::Fasta, WriteOptions::default());
//! writer.write(&alignment, &OutputMode::Combined(Destination::Path("region.fasta".into())))?;
//! # Ok::<(), nexalign::Error>(())
//! ```

pub mod convert;
pub mod error;
pub mod filter;
pub mod model;
pub mod nexus;
pub mod parser;
pub mod transform;
pub mod writer;

pub use crate::convert::{convert, ConvertConfig, Input};
pub use crate::error::{Error, Result};
pub use crate::model::Alignment;

use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Nexus API
// ============================================================================
/// Parses the MATRIX block of a NEXUS file using default settings,
/// returning an [Alignment].
///
/// See [`nexus::parse_file`] for full documentation.
pub fn parse_nexus_file<P: AsRef<Path>>(path: P) -> std::result::Result<Alignment, ParsingError> {
    nexus::parse_file(path)
}
