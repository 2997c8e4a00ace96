//! Character-level sequence and label transforms.

use regex::Regex;
use std::sync::LazyLock;

/// File-name suffixes removed by [fix_header], case-insensitive
static FASTA_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(fasta|fas|fna|faa|ffn|fa)").expect("suffix pattern is valid")
});

/// Complements a single nucleotide (A↔T, C↔G, any case), uppercased.
/// Every other character passes through unchanged.
#[inline]
fn complement(c: char) -> char {
    match c.to_ascii_uppercase() {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        _ => c,
    }
}

/// Returns the reverse complement of a nucleotide sequence in uppercase.
///
/// Only A, C, G and T are complemented; ambiguity codes, gaps and any other
/// symbol pass through unchanged, apart from being uppercased.
///
/// # Example
/// ```
/// use nexalign::transform::reverse_complement;
///
/// assert_eq!(reverse_complement("aacg-N"), "N-CGTT");
/// assert_eq!(reverse_complement(&reverse_complement("AcGt")), "ACGT");
/// ```
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|c| complement(c).to_ascii_uppercase())
        .collect()
}

/// Collapses nucleotide ambiguity codes to a single base in one pass:
/// `Y K D H B N` → `T`, `R W M V` → `A`, `S` → `G`.
///
/// Assumes nucleotide data; amino-acid sequences would be corrupted.
///
/// # Example
/// ```
/// use nexalign::transform::collapse_ambiguity;
///
/// assert_eq!(collapse_ambiguity("ACGTYKDHBNRWMVS"), "ACGTTTTTTTAAAAG");
/// ```
pub fn collapse_ambiguity(sequence: &str) -> String {
    sequence
        .chars()
        .map(|c| match c {
            'Y' | 'K' | 'D' | 'H' | 'B' | 'N' => 'T',
            'R' | 'W' | 'M' | 'V' => 'A',
            'S' => 'G',
            other => other,
        })
        .collect()
}

/// Cuts a label at its first FASTA file suffix (`.fasta`, `.fas`, `.fa`, …).
///
/// # Example
/// ```
/// use nexalign::transform::fix_header;
///
/// assert_eq!(fix_header("sample1.fasta.aln"), "sample1");
/// assert_eq!(fix_header("sample2.FA"), "sample2");
/// assert_eq!(fix_header("sample3"), "sample3");
/// ```
pub fn fix_header(label: &str) -> String {
    match FASTA_SUFFIX.find(label) {
        Some(m) => label[..m.start()].to_string(),
        None => label.to_string(),
    }
}

/// Breaks a sequence into lines of `width` characters; the last line may be
/// shorter. A width of 0 leaves the sequence unchanged.
///
/// # Example
/// ```
/// use nexalign::transform::wrap;
///
/// assert_eq!(wrap("ACGTACGTAC", 4), "ACGT\nACGT\nAC");
/// ```
pub fn wrap(sequence: &str, width: usize) -> String {
    if width == 0 {
        return sequence.to_string();
    }
    let chars: Vec<char> = sequence.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
