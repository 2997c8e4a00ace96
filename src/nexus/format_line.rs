//! Parser for the FORMAT declaration of a DATA block.
//!
//! Only the fixed layout
//! `FORMAT DATATYPE = <type> GAP = <gap> MISSING = <missing> Interleave = <bool>;`
//! is recognized. Delimiters are literal and case-sensitive; whitespace around
//! `=` is optional.

use crate::model::FormatInfo;
use crate::nexus::defs::FORMAT_MARKER;
use crate::parser::ParsingError;
use log::warn;
use regex::Regex;
use std::sync::LazyLock;

static FORMAT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"FORMAT DATATYPE\s*=\s*(?P<datatype>.*?)\s+GAP\s*=\s*(?P<gap>.*?)\s+MISSING\s*=\s*(?P<missing>.*?)\s+Interleave\s*=\s*(?P<interleave>[^;]*?)\s*;",
    )
    .expect("FORMAT pattern is valid")
});

/// Returns whether a line holds a FORMAT declaration.
pub(crate) fn is_format_line(line: &str) -> bool {
    line.contains(FORMAT_MARKER)
}

/// Parses a FORMAT declaration line into [FormatInfo].
///
/// # Arguments
/// * `line` - The line containing `FORMAT DATATYPE`
/// * `line_number` - 1-based line number, used for error reporting
///
/// An Interleave value other than yes/no/true/false leaves `interleaved`
/// unset; the other fields are kept.
///
/// # Errors
/// Returns an `InvalidFormatLine` error if the line does not follow the fixed layout.
///
/// # Example
/// ```
/// use nexalign::nexus::parse_format_line;
///
/// let info = parse_format_line("FORMAT DATATYPE = DNA GAP = - MISSING = ? Interleave = yes;", 1).unwrap();
/// assert_eq!(info.datatype.as_deref(), Some("DNA"));
/// assert_eq!(info.gap.as_deref(), Some("-"));
/// assert_eq!(info.missing.as_deref(), Some("?"));
/// assert_eq!(info.interleaved, Some(true));
/// ```
pub fn parse_format_line(line: &str, line_number: usize) -> Result<FormatInfo, ParsingError> {
    let caps = FORMAT_LINE.captures(line).ok_or_else(|| {
        ParsingError::invalid_format_line(
            line_number,
            line.trim(),
            "expected 'FORMAT DATATYPE = .. GAP = .. MISSING = .. Interleave = ..;'".to_string(),
        )
    })?;

    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let interleaved = field("interleave").and_then(|value| {
        let parsed = parse_bool(&value);
        if parsed.is_none() {
            warn!("Line {line_number}: unrecognized Interleave value '{value}', leaving it unset");
        }
        parsed
    });

    Ok(FormatInfo {
        datatype: field("datatype"),
        gap: field("gap"),
        missing: field("missing"),
        interleaved,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    #[test]
    fn test_indented_without_spaces() {
        let info = parse_format_line("\tFORMAT DATATYPE=PROTEIN GAP=- MISSING=N Interleave=no;", 3).unwrap();
        assert_eq!(info.datatype.as_deref(), Some("PROTEIN"));
        assert_eq!(info.missing.as_deref(), Some("N"));
        assert_eq!(info.interleaved, Some(false));
    }

    #[test]
    fn test_free_text_values() {
        let info = parse_format_line("FORMAT DATATYPE = DNA RNA GAP = - MISSING = ? Interleave = no;", 1).unwrap();
        assert_eq!(info.datatype.as_deref(), Some("DNA RNA"));
    }

    #[test]
    fn test_other_field_order_is_rejected() {
        let err = parse_format_line("FORMAT DATATYPE=DNA MISSING=? GAP=-;", 5).unwrap_err();
        assert!(matches!(err.kind(), ParsingErrorType::InvalidFormatLine(_)));
        assert_eq!(err.line(), 5);
    }

    #[test]
    fn test_unknown_interleave_value_keeps_other_fields() {
        let info = parse_format_line("FORMAT DATATYPE = DNA GAP = . MISSING = ? Interleave = 0;", 1).unwrap();
        assert_eq!(info.datatype.as_deref(), Some("DNA"));
        assert_eq!(info.gap.as_deref(), Some("."));
        assert_eq!(info.missing.as_deref(), Some("?"));
        assert_eq!(info.interleaved, None);
    }

    #[test]
    fn test_is_format_line() {
        assert!(is_format_line("  FORMAT DATATYPE = DNA"));
        assert!(!is_format_line("format datatype = DNA"));
    }
}
