//! Sequence transform pipeline applied between parsing and writing.
//!
//! [apply] runs the enabled stages of a [TransformConfig] on every record of
//! an [Alignment], always in the same order:
//! 1. label dash removal ([strip_label_dashes])
//! 2. ambiguity collapse ([collapse_ambiguity])
//! 3. substring extraction ([SubstringSpec]); inverted bounds switch on stage 4
//! 4. reverse complement ([reverse_complement]) of the (sliced) sequence
//! 5. header fix ([fix_header])
//!
//! Line wrapping ([wrap]) is presentation only and is applied by the writers
//! of formats with multi-line sequence bodies (MEGA), see
//! [WriteOptions](crate::writer::WriteOptions).
//!
//! A sequence is reverse-complemented at most once: an explicit
//! `reverse_complement` together with inverted substring bounds gives the
//! same result as either one alone.

mod sequence;
mod substring;

pub use self::sequence::{collapse_ambiguity, fix_header, reverse_complement, wrap};
pub use self::substring::{NormalizedSubstring, SubstringSpec};

use crate::error::Result;
use crate::model::Alignment;
use crate::parser::utils::strip_label_dashes;
use log::{debug, warn};

/// Typed configuration of the transform pipeline. All stages are off by default.
///
/// # Example
/// ```
/// use nexalign::transform::{SubstringSpec, TransformConfig};
///
/// let config = TransformConfig::default()
///     .with_substring(SubstringSpec::new(20, 1))
///     .with_no_ambiguity();
/// assert!(config.substring.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformConfig {
    pub reverse_complement: bool,
    pub substring: Option<SubstringSpec>,
    pub no_ambiguity: bool,
    pub wrap_width: Option<usize>,
    pub header_fix: bool,
    pub header_dash_strip: bool,
}

impl TransformConfig {
    pub fn with_reverse_complement(mut self) -> Self {
        self.reverse_complement = true;
        self
    }

    pub fn with_substring(mut self, spec: SubstringSpec) -> Self {
        self.substring = Some(spec);
        self
    }

    pub fn with_no_ambiguity(mut self) -> Self {
        self.no_ambiguity = true;
        self
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = Some(width);
        self
    }

    pub fn with_header_fix(mut self) -> Self {
        self.header_fix = true;
        self
    }

    pub fn with_header_dash_strip(mut self) -> Self {
        self.header_dash_strip = true;
        self
    }

    /// Returns `true` if no record-changing stage is enabled.
    pub fn is_identity(&self) -> bool {
        !self.reverse_complement
            && self.substring.is_none()
            && !self.no_ambiguity
            && !self.header_fix
            && !self.header_dash_strip
    }
}

/// Applies the configured stages to every record of `alignment`.
///
/// # Errors
/// Returns [Error::InvalidRange](crate::Error::InvalidRange) if the substring
/// bounds are invalid; the alignment is left untouched in that case.
pub fn apply(mut alignment: Alignment, config: &TransformConfig) -> Result<Alignment> {
    if config.is_identity() {
        return Ok(alignment);
    }

    // Validate bounds before touching any record
    let substring = config.substring.map(|spec| spec.normalize()).transpose()?;
    let revcomp = config.reverse_complement
        || substring.as_ref().is_some_and(|s| s.implied_revcomp);

    debug!(
        "Transforming {} records (substring: {:?}, reverse complement: {revcomp})",
        alignment.num_records(),
        substring.as_ref().map(|s| &s.range)
    );

    alignment.map_records(|record| {
        if config.header_dash_strip {
            record.label = strip_label_dashes(&record.label);
        }
        if config.no_ambiguity {
            record.sequence = collapse_ambiguity(&record.sequence);
        }
        if let Some(sub) = &substring {
            if sub.range.start >= record.sequence.len() {
                warn!(
                    "Sequence '{}' ({} chars) ends before substring start {}",
                    record.label,
                    record.sequence.len(),
                    sub.range.start + 1
                );
            }
            record.sequence = sub.extract(&record.sequence).to_string();
        }
        if revcomp {
            record.sequence = reverse_complement(&record.sequence);
        }
        if config.header_fix {
            record.label = fix_header(&record.label);
        }
    });

    Ok(alignment)
}
