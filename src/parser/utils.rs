//! Utility functions for taxon labels and MATRIX record lines.
//!
//! This module provides the label normalization applied to every taxon label
//! read from a MATRIX block, and the splitting of a record line into its
//! label and sequence fields.

/// Normalizes a taxon label:
/// - leading and trailing whitespace is removed, and
/// - every interior run of whitespace becomes a single underscore.
///
/// # Arguments
/// * `label` - The raw label as found in the MATRIX record
///
/// # Returns
/// The normalized label without any whitespace
///
/// # Examples
/// ```
/// # use nexalign::parser::utils::normalize_label;
/// assert_eq!(normalize_label("Pukeko"), "Pukeko");
/// assert_eq!(normalize_label("  Australasian Swamphen"), "Australasian_Swamphen");
/// assert_eq!(normalize_label("\tBaillon's  Crake "), "Baillon's_Crake");
/// ```
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Removes dashes from a label, after turning a `.1` version suffix into `-1`
/// (so `AB123.1` becomes `AB1231`).
///
/// # Examples
/// ```
/// # use nexalign::parser::utils::strip_label_dashes;
/// assert_eq!(strip_label_dashes("AB123.1"), "AB1231");
/// assert_eq!(strip_label_dashes("Storm-petrel"), "Stormpetrel");
/// assert_eq!(strip_label_dashes("Kaka"), "Kaka");
/// ```
pub fn strip_label_dashes(label: &str) -> String {
    label.replace(".1", "-1").replace('-', "")
}

/// Splits a MATRIX record line into its (label, sequence) fields.
///
/// Leading whitespace is ignored. The fields are separated by the first run of
/// two or more spaces, or by the first whitespace run that contains a tab,
/// so that labels with single interior spaces survive intact.
///
/// # Returns
/// * `Some((label, sequence))` - Both fields, the sequence still untrimmed
/// * `None` - If the line has no such separator or one of the fields is empty
///
/// # Examples
/// ```
/// # use nexalign::parser::utils::split_record;
/// assert_eq!(split_record("\tseqA      ACGT"), Some(("seqA", "ACGT")));
/// assert_eq!(split_record("Homo sapiens  AC GT"), Some(("Homo sapiens", "AC GT")));
/// assert_eq!(split_record("seqB\tACGT"), Some(("seqB", "ACGT")));
/// assert_eq!(split_record("seqC ACGT"), None);
/// ```
pub fn split_record(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    let bytes = line.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b' ' || bytes[i] == b'\t' {
            // Measure the whole whitespace run starting here
            let start = i;
            let mut has_tab = false;
            while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
                has_tab |= bytes[i] == b'\t';
                i += 1;
            }

            if has_tab || i - start >= 2 {
                let label = &line[..start];
                let sequence = line[i..].trim_end();
                if label.is_empty() || sequence.is_empty() {
                    return None;
                }
                return Some((label, sequence));
            }
        } else {
            i += 1;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_record_keeps_single_spaces_in_label() {
        assert_eq!(
            split_record("  Wilson's storm petrel   ACGT-AC"),
            Some(("Wilson's storm petrel", "ACGT-AC"))
        );
    }

    #[test]
    fn test_split_record_rejects_missing_sequence() {
        assert_eq!(split_record("seqA    "), None);
        assert_eq!(split_record("seqA"), None);
        assert_eq!(split_record(""), None);
    }

    #[test]
    fn test_normalize_then_strip() {
        let label = normalize_label(" NC 045512.1 ");
        assert_eq!(label, "NC_045512.1");
        assert_eq!(strip_label_dashes(&label), "NC_0455121");
    }
}
