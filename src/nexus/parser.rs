use crate::model::{Alignment, FormatInfo};
use crate::nexus::defs::{END_MARKER, MATRIX_MARKER, MATRIX_TERMINATOR};
use crate::nexus::format_line::{is_format_line, parse_format_line};
use crate::parser::utils::{normalize_label, split_record, strip_label_dashes};
use crate::parser::ParsingError;
use log::{debug, warn};
use std::fs;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// GAP HANDLING
// =#========================================================================#=
/// What the parser does with gap symbols in sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapHandling {
    /// Remove `-` and the declared GAP symbol from every sequence (default)
    #[default]
    Strip,
    /// Keep sequences as written
    Keep,
}


// =#========================================================================#=
// NEXUS PARSER BUILDER
// =#========================================================================#=
/// Builder for configuring and creating a [NexusParser].
///
/// The builder holds the whole input in memory. Once configured, call
/// [build()](NexusParserBuilder::build) to parse the input into an
/// [Alignment] together with the text before and after the MATRIX block.
///
/// # Configuration Options
///
/// * **Gaps**: removed from sequences by default
///   - [keep_gaps()](NexusParserBuilder::keep_gaps) - Keep gap symbols
///
/// * **Case**: sequences are uppercased by default
///   - [keep_case()](NexusParserBuilder::keep_case) - Keep sequence case as written
///
/// * **Labels**: interior whitespace always becomes an underscore
///   - [with_dash_removal()](NexusParserBuilder::with_dash_removal) - Turn `.1` into `-1`, then remove all `-`
///
/// # Example
/// ```no_run
/// use nexalign::nexus::NexusParserBuilder;
///
/// let parser = NexusParserBuilder::for_file("primates.nex")?
///     .keep_gaps()
///     .build()?;
///
/// let alignment = parser.alignment();
/// println!("{} taxa, {} characters", alignment.num_records(), alignment.max_sequence_len());
/// # Ok::<(), nexalign::parser::ParsingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NexusParserBuilder {
    input: String,
    gaps: GapHandling,
    uppercase: bool,
    dash_removal: bool,
}

// ============================================================================
// Building (pub)
// ============================================================================
impl NexusParserBuilder {
    /// Creates a new builder from a file, reading it entirely into memory.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let input = fs::read_to_string(path)?;
        Ok(Self::for_string(input))
    }

    /// Creates a new builder reading everything from `reader` (e.g. standard input).
    ///
    /// # Errors
    /// Returns an IO error if reading fails
    pub fn for_reader<R: Read>(mut reader: R) -> Result<Self, ParsingError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(Self::for_string(input))
    }

    /// Creates a new builder from text already in memory.
    pub fn for_str(input: &str) -> Self {
        Self::for_string(input.to_string())
    }

    fn for_string(input: String) -> Self {
        NexusParserBuilder {
            input,
            gaps: GapHandling::Strip,
            uppercase: true,
            dash_removal: false,
        }
    }

    /// Keep gap symbols in sequences instead of removing them.
    pub fn keep_gaps(mut self) -> Self {
        self.gaps = GapHandling::Keep;
        self
    }

    /// Set the gap handling explicitly.
    pub fn with_gaps(mut self, gaps: GapHandling) -> Self {
        self.gaps = gaps;
        self
    }

    /// Keep sequences in the case they were written in.
    pub fn keep_case(mut self) -> Self {
        self.uppercase = false;
        self
    }

    /// Remove dashes from labels (after turning `.1` into `-1`).
    pub fn with_dash_removal(mut self) -> Self {
        self.dash_removal = true;
        self
    }

    /// Parses the input into a [NexusParser] holding the results.
    ///
    /// # Errors
    /// Returns a `MalformedRecord` error for a MATRIX line that cannot be split
    /// into label and sequence.
    pub fn build(self) -> Result<NexusParser, ParsingError> {
        let lines: Vec<&str> = self.input.lines().collect();
        let scan = scan_lines(&lines);

        let mut alignment = Alignment::new(scan.format);
        let gap_symbol = alignment.format().gap.clone();

        let num_records = scan.records.len();
        for (i, (line_number, line)) in scan.records.into_iter().enumerate() {
            let (raw_label, raw_sequence) = split_record(line)
                .ok_or_else(|| ParsingError::malformed_record(line_number, line))?;

            let mut label = normalize_label(raw_label);
            if self.dash_removal {
                label = strip_label_dashes(&label);
            }

            let mut sequence: String = raw_sequence.split_whitespace().collect();
            // Terminator glued to the last record, e.g. "seqZ  ACGT;"
            if i + 1 == num_records {
                if let Some(stripped) = sequence.strip_suffix(';') {
                    sequence = stripped.to_string();
                }
            }
            if self.uppercase {
                sequence.make_ascii_uppercase();
            }
            if self.gaps == GapHandling::Strip {
                sequence = strip_gaps(&sequence, gap_symbol.as_deref());
            }
            // An all-gap sequence may legitimately end up empty after stripping
            if sequence.is_empty() && self.gaps == GapHandling::Keep {
                return Err(ParsingError::malformed_record(line_number, line));
            }

            alignment.insert(label, sequence);
        }

        debug!("Parsed {} records from MATRIX block", alignment.num_records());

        Ok(NexusParser {
            alignment,
            leading_text: scan.leading.join("\n"),
            trailing_text: scan.trailing.join("\n"),
        })
    }
}


// =#========================================================================#=
// NEXUS PARSER
// =#========================================================================#=
/// Results of parsing a NEXUS file: the [Alignment] of its MATRIX block and
/// the non-blank text before and after that block.
#[derive(Debug, Clone)]
pub struct NexusParser {
    alignment: Alignment,
    leading_text: String,
    trailing_text: String,
}

impl NexusParser {
    /// Returns the parsed alignment.
    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    /// Returns the non-blank lines before the MATRIX line, joined by newlines.
    pub fn leading_text(&self) -> &str {
        &self.leading_text
    }

    /// Returns the non-blank lines after the closing `END;`, joined by newlines.
    pub fn trailing_text(&self) -> &str {
        &self.trailing_text
    }

    /// Consumes the parser, returning (alignment, leading text, trailing text).
    pub fn into_parts(self) -> (Alignment, String, String) {
        (self.alignment, self.leading_text, self.trailing_text)
    }

    /// Consumes the parser, returning only the alignment.
    pub fn into_alignment(self) -> Alignment {
        self.alignment
    }
}


// ============================================================================
// Line scanning (private)
// ============================================================================
/// Raw result of the single pass over the input lines.
struct LineScan<'a> {
    format: FormatInfo,
    /// MATRIX record lines with their 1-based line numbers
    records: Vec<(usize, &'a str)>,
    leading: Vec<&'a str>,
    trailing: Vec<&'a str>,
}

/// Position of the scan relative to the MATRIX block.
#[derive(PartialEq)]
enum ScanState {
    BeforeMatrix,
    InMatrix,
    AfterMatrix,
}

fn scan_lines<'a>(lines: &[&'a str]) -> LineScan<'a> {
    let mut format = FormatInfo::default();
    let mut block: Vec<(usize, &'a str)> = Vec::new();
    let mut leading = Vec::new();
    let mut trailing = Vec::new();
    let mut state = ScanState::BeforeMatrix;

    for (idx, &line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = idx + 1;

        match state {
            ScanState::BeforeMatrix => {
                if line.contains(MATRIX_MARKER) {
                    debug!("MATRIX block starts at line {line_number}");
                    state = ScanState::InMatrix;
                    block.push((line_number, line));
                    continue;
                }
                if is_format_line(line) {
                    match parse_format_line(line, line_number) {
                        Ok(info) => format = info,
                        Err(e) => warn!("Ignoring FORMAT declaration: {e}"),
                    }
                }
                leading.push(line);
            }
            ScanState::InMatrix => {
                block.push((line_number, line));
                if line.contains(END_MARKER) {
                    debug!("MATRIX block ends at line {line_number}");
                    state = ScanState::AfterMatrix;
                }
            }
            ScanState::AfterMatrix => trailing.push(line),
        }
    }

    match state {
        ScanState::BeforeMatrix => warn!("No MATRIX block found, alignment is empty"),
        ScanState::InMatrix => {
            warn!("MATRIX block is not closed by '{END_MARKER}', alignment is empty");
            block.clear();
        }
        ScanState::AfterMatrix => {}
    }
    if format == FormatInfo::default() {
        debug!("No FORMAT declaration found");
    }

    LineScan { format, records: trim_block(block), leading, trailing }
}

/// Drops the MATRIX marker line, the END; line and a lone `;` line before it.
fn trim_block(mut block: Vec<(usize, &str)>) -> Vec<(usize, &str)> {
    if block.is_empty() {
        return block;
    }
    block.remove(0);
    block.pop();
    if block.last().is_some_and(|(_, line)| line.trim() == MATRIX_TERMINATOR) {
        block.pop();
    }
    block
}

/// Removes `-` and the declared gap symbol (if a single character) from a sequence.
pub(crate) fn strip_gaps(sequence: &str, gap_symbol: Option<&str>) -> String {
    let declared = gap_symbol.and_then(|g| {
        let mut chars = g.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    });
    sequence
        .chars()
        .filter(|&c| c != '-' && Some(c) != declared)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    const SMALL: &str = "#NEXUS\n\
        BEGIN DATA;\n\
        \tDIMENSIONS NTAX=3 NCHAR=8;\n\
        \tFORMAT DATATYPE = DNA GAP = - MISSING = ? Interleave = no;\n\
        \tMATRIX\n\
        \tseqA    ACGT-ACG\n\
        \n\
        \tseqB    acgtaacg\n\
        \touter group  AC--AC\n\
        \t;\n\
        END;\n\
        BEGIN PAUP;\n\
        END;\n";

    #[test]
    fn test_parse_small_block() {
        let parser = NexusParserBuilder::for_str(SMALL).build().unwrap();
        let alignment = parser.alignment();

        assert_eq!(alignment.num_records(), 3);
        assert_eq!(alignment.get("seqA"), Some("ACGTACG"));
        assert_eq!(alignment.get("seqB"), Some("ACGTAACG"));
        assert_eq!(alignment.get("outer_group"), Some("ACAC"));
        assert_eq!(alignment.format().datatype.as_deref(), Some("DNA"));
        assert_eq!(alignment.format().interleaved, Some(false));
    }

    #[test]
    fn test_leading_and_trailing_text() {
        let (_, leading, trailing) = NexusParserBuilder::for_str(SMALL).build().unwrap().into_parts();
        assert!(leading.starts_with("#NEXUS\nBEGIN DATA;"));
        assert!(leading.ends_with("Interleave = no;"));
        assert_eq!(trailing, "BEGIN PAUP;\nEND;");
    }

    #[test]
    fn test_keep_gaps_and_case() {
        let parser = NexusParserBuilder::for_str(SMALL).keep_gaps().keep_case().build().unwrap();
        assert_eq!(parser.alignment().get("seqA"), Some("ACGT-ACG"));
        assert_eq!(parser.alignment().get("seqB"), Some("acgtaacg"));
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let input = "MATRIX\nseqA ACGT\n;\nEND;\n";
        let err = NexusParserBuilder::for_str(input).build().unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::MalformedRecord);
        assert_eq!(err.line(), 2);
        assert_eq!(err.context(), "seqA ACGT");
    }

    #[test]
    fn test_no_matrix_yields_empty_alignment() {
        let parser = NexusParserBuilder::for_str("#NEXUS\nBEGIN TREES;\nEND;\n").build().unwrap();
        assert!(parser.alignment().is_empty());
        assert_eq!(parser.alignment().format(), &FormatInfo::default());
    }

    #[test]
    fn test_terminator_on_last_record() {
        let parser = NexusParserBuilder::for_str("MATRIX\nA  ACGT\nB  TTTT;\nEND;").build().unwrap();
        assert_eq!(parser.alignment().get("B"), Some("TTTT"));
    }

    #[test]
    fn test_unclosed_matrix_yields_empty_alignment() {
        let parser = NexusParserBuilder::for_str("MATRIX\nA  ACGT\nB  TTTT\n").build().unwrap();
        assert!(parser.alignment().is_empty());

        // Text after the records would otherwise be read as a malformed record
        let input = "#NEXUS\nBEGIN DATA;\nMATRIX\nA  ACGT\n;\nBEGIN TREES;\n";
        let parser = NexusParserBuilder::for_str(input).build().unwrap();
        assert!(parser.alignment().is_empty());
    }

    #[test]
    fn test_unknown_interleave_keeps_gap_symbol() {
        let input = "FORMAT DATATYPE = DNA GAP = . MISSING = ? Interleave = 0;\nMATRIX\nA  AC..GT\n;\nEND;";
        let parser = NexusParserBuilder::for_str(input).build().unwrap();
        let alignment = parser.alignment();
        assert_eq!(alignment.format().datatype.as_deref(), Some("DNA"));
        assert_eq!(alignment.format().gap.as_deref(), Some("."));
        assert_eq!(alignment.format().interleaved, None);
        assert_eq!(alignment.get("A"), Some("ACGT"));
    }

    #[test]
    fn test_dash_removal_on_labels() {
        let input = "MATRIX\nNC-045512.1  ACGT\nplain  TTTT\nEND;";
        let parser = NexusParserBuilder::for_str(input).with_dash_removal().build().unwrap();
        assert_eq!(parser.alignment().labels().collect::<Vec<_>>(), vec!["NC0455121", "plain"]);
    }

    #[test]
    fn test_strip_gaps_with_declared_symbol() {
        assert_eq!(strip_gaps("AC.-GT", Some(".")), "ACGT");
        assert_eq!(strip_gaps("AC.-GT", None), "AC.GT");
    }
}
