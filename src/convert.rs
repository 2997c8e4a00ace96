//! One conversion run: parse → transform → write.

use crate::error::Result;
use crate::nexus::{GapHandling, NexusParserBuilder};
use crate::transform::{self, TransformConfig};
use crate::writer::{AlignmentFormat, AlignmentWriter, Destination, OutputMode, WriteOptions};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// Where the NEXUS input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    /// Default destination for a combined output: the input path with the
    /// format's extension, or standard output when reading standard input.
    pub fn default_destination(&self, format: AlignmentFormat) -> Destination {
        match self {
            Input::Stdin => Destination::Stdout,
            Input::Path(path) => Destination::Path(derived_path(path, format)),
        }
    }
}

/// `aln.nex` → `aln.phy`; a NEXUS target gets a `.out.nex` suffix so the input is not overwritten.
fn derived_path(path: &Path, format: AlignmentFormat) -> PathBuf {
    let same_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
    if same_extension {
        path.with_extension(format!("out.{}", format.extension()))
    } else {
        path.with_extension(format.extension())
    }
}

/// Fully resolved configuration of a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub format: AlignmentFormat,
    pub gaps: GapHandling,
    pub keep_case: bool,
    pub transform: TransformConfig,
    pub options: WriteOptions,
}

impl ConvertConfig {
    pub fn new(format: AlignmentFormat) -> Self {
        ConvertConfig {
            format,
            gaps: GapHandling::default(),
            keep_case: false,
            transform: TransformConfig::default(),
            options: WriteOptions::default(),
        }
    }
}

/// Reads a NEXUS alignment, applies the transforms and writes it.
///
/// # Returns
/// The destinations written
///
/// # Errors
/// Fails on a malformed MATRIX record, invalid substring bounds or an
/// output that cannot be opened.
pub fn convert(input: &Input, config: &ConvertConfig, mode: &OutputMode) -> Result<Vec<Destination>> {
    let builder = match input {
        Input::Stdin => NexusParserBuilder::for_reader(io::stdin().lock())?,
        Input::Path(path) => NexusParserBuilder::for_file(path)?,
    };
    let mut builder = builder.with_gaps(config.gaps);
    if config.keep_case {
        builder = builder.keep_case();
    }

    let alignment = builder.build()?.into_alignment();
    info!("Read {} records", alignment.num_records());

    let alignment = transform::apply(alignment, &config.transform)?;

    let mut options = config.options.clone();
    if options.wrap_width.is_none() {
        options.wrap_width = config.transform.wrap_width;
    }
    AlignmentWriter::new(config.format, options).write(&alignment, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_destination() {
        let input = Input::Path(PathBuf::from("data/aln.nex"));
        assert_eq!(
            input.default_destination(AlignmentFormat::Phylip),
            Destination::Path(PathBuf::from("data/aln.phy"))
        );
        assert_eq!(
            input.default_destination(AlignmentFormat::Nexus),
            Destination::Path(PathBuf::from("data/aln.out.nex"))
        );
        assert_eq!(Input::Stdin.default_destination(AlignmentFormat::Fasta), Destination::Stdout);
    }
}
