//! Alignment module for sequence alignments read from a NEXUS MATRIX block.
//!
//! - `AlignmentRecord`: One taxon label with its sequence.
//! - `FormatInfo`: Metadata of the FORMAT declaration.
//! - `Alignment`: Ordered, label-indexed collection of records plus metadata.

use log::warn;
use std::collections::HashMap;
use std::fmt;

// =#========================================================================#=
// ALIGNMENT RECORD
// =#========================================================================#=
/// A single taxon of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub label: String,
    pub sequence: String,
}

impl AlignmentRecord {
    pub fn new(label: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self { label: label.into(), sequence: sequence.into() }
    }
}

// =#========================================================================#=
// FORMAT INFO
// =#========================================================================#=
/// Metadata of a `FORMAT DATATYPE = … GAP = … MISSING = … Interleave = …;` line.
///
/// Every field is `None` if the input had no (parsable) FORMAT line; writers
/// echo missing fields as blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatInfo {
    pub datatype: Option<String>,
    pub gap: Option<String>,
    pub missing: Option<String>,
    pub interleaved: Option<bool>,
}

impl FormatInfo {
    /// Returns the declared datatype or an empty string.
    pub fn datatype_or_blank(&self) -> &str {
        self.datatype.as_deref().unwrap_or("")
    }

    /// Returns the declared gap symbol or an empty string.
    pub fn gap_or_blank(&self) -> &str {
        self.gap.as_deref().unwrap_or("")
    }

    /// Returns the declared missing symbol or an empty string.
    pub fn missing_or_blank(&self) -> &str {
        self.missing.as_deref().unwrap_or("")
    }
}

// =#========================================================================#=
// ALIGNMENT
// =#========================================================================#=
/// Ordered collection of [AlignmentRecord]s with unique labels.
///
/// Records keep the order of first appearance. Inserting a label that is
/// already present replaces its sequence in place (last write wins) and
/// logs a warning; the record keeps its original position.
///
/// # Example
/// ```
/// use nexalign::model::Alignment;
///
/// let mut alignment = Alignment::default();
/// alignment.insert("seqA", "ACGT");
/// alignment.insert("seqB", "TTGA");
/// alignment.insert("seqA", "CCCC"); // overwrites, keeps first slot
///
/// assert_eq!(alignment.num_records(), 2);
/// assert_eq!(alignment.get("seqA"), Some("CCCC"));
/// assert_eq!(alignment.labels().collect::<Vec<_>>(), vec!["seqA", "seqB"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    /// FORMAT metadata of the source DATA block
    format: FormatInfo,
    /// Records in order of first appearance
    records: Vec<AlignmentRecord>,
    /// Map from label to its index in `records`
    index: HashMap<String, usize>,
}

impl Alignment {
    /// Creates an empty alignment carrying the given FORMAT metadata.
    pub fn new(format: FormatInfo) -> Self {
        Alignment { format, records: Vec::new(), index: HashMap::new() }
    }

    /// Inserts a record, overwriting the sequence of an existing record with
    /// the same label.
    ///
    /// # Returns
    /// `true` if an existing record was overwritten, `false` if the label is new
    pub fn insert(&mut self, label: impl Into<String>, sequence: impl Into<String>) -> bool {
        let label = label.into();
        let sequence = sequence.into();

        if let Some(&idx) = self.index.get(&label) {
            warn!("Duplicate label '{label}', keeping the later sequence");
            self.records[idx].sequence = sequence;
            true
        } else {
            self.index.insert(label.clone(), self.records.len());
            self.records.push(AlignmentRecord { label, sequence });
            false
        }
    }

    /// Retrieves the sequence stored for a label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.index.get(label).map(|&idx| self.records[idx].sequence.as_str())
    }

    /// Checks if a label exists in the alignment.
    pub fn contains_label(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Returns the number of records (NTAX).
    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the labels in order of first appearance.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.label.as_str())
    }

    /// Returns the records in order of first appearance.
    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }

    pub fn format(&self) -> &FormatInfo {
        &self.format
    }

    pub fn set_format(&mut self, format: FormatInfo) {
        self.format = format;
    }

    /// Returns the length of the longest sequence (NCHAR over the whole alignment).
    pub fn max_sequence_len(&self) -> usize {
        self.records.iter().map(|r| r.sequence.len()).max().unwrap_or(0)
    }

    /// Rewrites every record in place with `f`.
    ///
    /// Labels changed by `f` are re-indexed; if two records end up with the
    /// same label, the later one wins and takes the slot of the earlier one.
    pub fn map_records<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut AlignmentRecord),
    {
        let records = std::mem::take(&mut self.records);
        self.index.clear();
        for mut record in records {
            f(&mut record);
            self.insert(record.label, record.sequence);
        }
    }

    /// Fallible variant of [map_records](Alignment::map_records); stops at the first error.
    pub fn try_map_records<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&mut AlignmentRecord) -> Result<(), E>,
    {
        let records = std::mem::take(&mut self.records);
        self.index.clear();
        for mut record in records {
            f(&mut record)?;
            self.insert(record.label, record.sequence);
        }
        Ok(())
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Alignment ({} records, {} max chars):", self.num_records(), self.max_sequence_len())?;
        for record in &self.records {
            writeln!(f, "  {} ({})", record.label, record.sequence.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_keeps_slot() {
        let mut alignment = Alignment::default();
        assert!(!alignment.insert("a", "AAA"));
        assert!(!alignment.insert("b", "CCC"));
        assert!(alignment.insert("a", "GGG"));

        assert_eq!(alignment.num_records(), 2);
        assert_eq!(alignment.records()[0], AlignmentRecord::new("a", "GGG"));
        assert_eq!(alignment.records()[1], AlignmentRecord::new("b", "CCC"));
    }

    #[test]
    fn test_map_records_reindexes_labels() {
        let mut alignment = Alignment::default();
        alignment.insert("x.fasta", "AC");
        alignment.insert("y", "ACGT");
        alignment.map_records(|r| r.label = r.label.replace(".fasta", ""));

        assert!(alignment.contains_label("x"));
        assert!(!alignment.contains_label("x.fasta"));
        assert_eq!(alignment.max_sequence_len(), 4);
    }

    #[test]
    fn test_empty_alignment() {
        let alignment = Alignment::new(FormatInfo::default());
        assert!(alignment.is_empty());
        assert_eq!(alignment.max_sequence_len(), 0);
        assert_eq!(alignment.format().datatype_or_blank(), "");
    }
}
