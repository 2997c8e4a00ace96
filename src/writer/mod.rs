//! Alignment writers for NEXUS, FASTA, PHYLIP and MEGA.
//!
//! This module provides:
//! - [AlignmentFormat] - the target layout
//! - [OutputMode] - where records go: one combined destination, one file
//!   per record (split) or only the records matching a filter (subset)
//! - [AlignmentWriter] - writes an [Alignment] in a format and mode
//! - [write_records] - serializes a set of records into any [Write]
//!
//! Modes and formats are independent: every mode works with every format.
//! NTAX, NCHAR and the label width are always computed over the records
//! actually written, so a subset or split file has its own dimensions.
//!
//! # Example
//! ```no_run
//! use nexalign::nexus::NexusParserBuilder;
//! use nexalign::writer::{AlignmentFormat, AlignmentWriter, Destination, OutputMode, WriteOptions};
//!
//! let alignment = NexusParserBuilder::for_file("primates.nex")?.build()?.into_alignment();
//! let writer = AlignmentWriter::new(AlignmentFormat::Phylip, WriteOptions::default());
//! writer.write(&alignment, &OutputMode::Combined(Destination::Path("primates.phy".into())))?;
//! # Ok::<(), nexalign::Error>(())
//! ```

mod fasta;
mod mega;
mod phylip;
pub(crate) mod text_writer;

use crate::error::{Error, Result};
use crate::filter::FetchFilter;
use crate::model::{AlignmentRecord, Alignment, FormatInfo};
use crate::nexus::defs::LABEL_PADDING;
use crate::nexus::write_nexus_matrix;
use log::{info, warn};
use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use text_writer::TextWriter;

// =#========================================================================#=
// FORMAT
// =#========================================================================#=
/// Target layout of an [AlignmentWriter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    /// Re-emitted NEXUS DATA block
    Nexus,
    /// `>label` + sequence, unwrapped
    Fasta,
    /// Sequential PHYLIP with fixed-width rows
    Phylip,
    /// MEGA `#mega` layout
    Mega,
}

impl AlignmentFormat {
    /// File extension used for derived output names.
    pub fn extension(&self) -> &'static str {
        match self {
            AlignmentFormat::Nexus => "nex",
            AlignmentFormat::Fasta => "fasta",
            AlignmentFormat::Phylip => "phy",
            AlignmentFormat::Mega => "meg",
        }
    }
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AlignmentFormat::Nexus => "NEXUS",
            AlignmentFormat::Fasta => "FASTA",
            AlignmentFormat::Phylip => "PHYLIP",
            AlignmentFormat::Mega => "MEGA",
        };
        f.write_str(name)
    }
}


// =#========================================================================#=
// OPTIONS & MODES
// =#========================================================================#=
/// Presentation options shared by all formats.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Line width for sequence bodies of multi-line formats (MEGA)
    pub wrap_width: Option<usize>,
    /// Title written by formats that carry one (MEGA)
    pub title: String,
    /// Write records sorted by label instead of input order
    pub sort_labels: bool,
    /// Fixed timestamp for the NEXUS comment; current local time if `None`
    pub timestamp: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            wrap_width: None,
            title: "Alignment".to_string(),
            sort_labels: false,
            timestamp: None,
        }
    }
}

/// Where a document is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Path(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("<stdout>"),
            Destination::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How records are distributed over destinations.
#[derive(Debug, Clone)]
pub enum OutputMode {
    /// All records into a single destination
    Combined(Destination),
    /// One file `<dir>/<label>.<ext>` per record, optionally only for matching labels
    Split { dir: PathBuf, filter: Option<FetchFilter> },
    /// Only records with a matching label, into a single destination
    Subset { filter: FetchFilter, destination: Destination },
}


// =#========================================================================#=
// DIMENSIONS
// =#========================================================================#=
/// Dimensions of the set of records written into one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of records
    pub ntax: usize,
    /// Length of the longest sequence, at least 1 if there are records
    pub nchar: usize,
    /// Length of the longest label
    pub label_width: usize,
}

impl Dimensions {
    pub fn of(records: &[&AlignmentRecord]) -> Self {
        // A row needs a non-empty sequence field to be read back, so all-empty
        // records still get one gap column
        let nchar = records.iter().map(|r| r.sequence.len()).max().map_or(0, |n| n.max(1));
        Dimensions {
            ntax: records.len(),
            nchar,
            label_width: records.iter().map(|r| r.label.len()).max().unwrap_or(0),
        }
    }

    /// Width of the padded label column in PHYLIP and NEXUS rows.
    pub fn label_column(&self) -> usize {
        self.label_width + LABEL_PADDING
    }
}

/// Everything a format serializer needs besides the records.
pub(crate) struct DocumentContext<'a> {
    pub(crate) dims: Dimensions,
    pub(crate) format_info: &'a FormatInfo,
    pub(crate) options: &'a WriteOptions,
}


// =#========================================================================#=
// SERIALIZATION
// =#========================================================================#=
/// Writes `records` as one complete document in `format` to `out`.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_records<W: Write>(
    out: W,
    format: AlignmentFormat,
    records: &[&AlignmentRecord],
    format_info: &FormatInfo,
    options: &WriteOptions,
) -> io::Result<()> {
    let ctx = DocumentContext { dims: Dimensions::of(records), format_info, options };
    let mut w = TextWriter::new(out);

    match format {
        AlignmentFormat::Nexus => write_nexus_matrix(&mut w, records, &ctx)?,
        AlignmentFormat::Fasta => fasta::write_fasta(&mut w, records)?,
        AlignmentFormat::Phylip => phylip::write_phylip(&mut w, records, &ctx)?,
        AlignmentFormat::Mega => mega::write_mega(&mut w, records, &ctx)?,
    }

    w.flush()
}


// =#========================================================================#=
// ALIGNMENT WRITER
// =#========================================================================#=
/// Writes an [Alignment] in one [AlignmentFormat] following an [OutputMode].
pub struct AlignmentWriter {
    format: AlignmentFormat,
    options: WriteOptions,
}

impl AlignmentWriter {
    pub fn new(format: AlignmentFormat, options: WriteOptions) -> Self {
        AlignmentWriter { format, options }
    }

    pub fn format(&self) -> AlignmentFormat {
        self.format
    }

    /// Writes the alignment according to `mode`.
    ///
    /// Destinations are created (and truncated) one after another; if one
    /// cannot be opened the run aborts and files already written are kept.
    ///
    /// # Returns
    /// The destinations written, in order
    ///
    /// # Errors
    /// * [Error::UnopenableDestination] if an output file or directory cannot be created
    /// * [Error::Io] if writing fails
    pub fn write(&self, alignment: &Alignment, mode: &OutputMode) -> Result<Vec<Destination>> {
        let records = self.ordered_records(alignment);

        match mode {
            OutputMode::Combined(destination) => {
                self.write_document(destination, &records, alignment.format())?;
                Ok(vec![destination.clone()])
            }
            OutputMode::Subset { filter, destination } => {
                let subset = select(&records, Some(filter));
                self.write_document(destination, &subset, alignment.format())?;
                Ok(vec![destination.clone()])
            }
            OutputMode::Split { dir, filter } => {
                let selected = select(&records, filter.as_ref());
                fs::create_dir_all(dir).map_err(|source| Error::UnopenableDestination {
                    path: dir.clone(),
                    source,
                })?;

                let mut written = Vec::with_capacity(selected.len());
                let mut used = HashSet::new();
                for record in selected {
                    let mut path = self.split_path(dir, &record.label);
                    let mut n = 2;
                    while !used.insert(path.clone()) {
                        path = self.split_path(dir, &format!("{}_{n}", record.label));
                        n += 1;
                    }
                    if n > 2 {
                        warn!("File name for '{}' is taken, writing {} instead", record.label, path.display());
                    }
                    let destination = Destination::Path(path);
                    self.write_document(&destination, &[record], alignment.format())?;
                    written.push(destination);
                }
                Ok(written)
            }
        }
    }

    /// Path of the split file for a label: `<dir>/<label>.<ext>`.
    ///
    /// Characters not allowed in file names become `_`. In split mode, a label
    /// whose path is already taken gets a `_2`, `_3`, … suffix.
    pub fn split_path(&self, dir: &Path, label: &str) -> PathBuf {
        let file_stem: String = label
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
            .collect();
        dir.join(format!("{file_stem}.{}", self.format.extension()))
    }

    fn ordered_records<'a>(&self, alignment: &'a Alignment) -> Vec<&'a AlignmentRecord> {
        let mut records: Vec<&AlignmentRecord> = alignment.records().iter().collect();
        if self.options.sort_labels {
            records.sort_by(|a, b| a.label.cmp(&b.label));
        }
        records
    }

    fn write_document(
        &self,
        destination: &Destination,
        records: &[&AlignmentRecord],
        format_info: &FormatInfo,
    ) -> Result<()> {
        match destination {
            Destination::Stdout => {
                write_records(io::stdout().lock(), self.format, records, format_info, &self.options)?;
            }
            Destination::Path(path) => {
                let file = File::create(path).map_err(|source| Error::UnopenableDestination {
                    path: path.clone(),
                    source,
                })?;
                write_records(file, self.format, records, format_info, &self.options)?;
            }
        }
        info!("Wrote {} records as {} to {destination}", records.len(), self.format);
        Ok(())
    }
}

/// Records whose label matches `filter` (all records without filter).
fn select<'a>(records: &[&'a AlignmentRecord], filter: Option<&FetchFilter>) -> Vec<&'a AlignmentRecord> {
    let Some(filter) = filter else {
        return records.to_vec();
    };
    let selected: Vec<&AlignmentRecord> = records
        .iter()
        .copied()
        .filter(|r| filter.matches(&r.label))
        .collect();
    if selected.is_empty() {
        warn!("Fetch filter '{}' matches no label", filter.pattern());
    }
    selected
}
