//! Substring extraction with 1-based inclusive bounds.

use crate::error::{Error, Result};
use std::ops::Range;

/// A user-facing substring request with 1-based inclusive bounds.
///
/// An `end` smaller than `start` requests the reverse complement of the
/// interval `[end, start]`; [normalize](SubstringSpec::normalize) turns that
/// into a forward range plus an implied reverse-complement flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstringSpec {
    pub start: i64,
    pub end: i64,
}

/// A [SubstringSpec] converted to a 0-based half-open range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSubstring {
    pub range: Range<usize>,
    /// Set if the bounds were inverted
    pub implied_revcomp: bool,
}

impl SubstringSpec {
    pub fn new(start: i64, end: i64) -> Self {
        SubstringSpec { start, end }
    }

    /// Converts the bounds to a 0-based half-open range.
    ///
    /// # Errors
    /// Returns [Error::InvalidRange] if the lower bound is below 1 (negative
    /// after conversion).
    ///
    /// # Example
    /// ```
    /// use nexalign::transform::SubstringSpec;
    ///
    /// let forward = SubstringSpec::new(1, 10).normalize().unwrap();
    /// assert_eq!(forward.range, 0..10);
    /// assert!(!forward.implied_revcomp);
    ///
    /// let inverted = SubstringSpec::new(10, 1).normalize().unwrap();
    /// assert_eq!(inverted.range, 0..10);
    /// assert!(inverted.implied_revcomp);
    /// ```
    pub fn normalize(&self) -> Result<NormalizedSubstring> {
        let (low, high, implied_revcomp) = if self.end < self.start {
            (self.end, self.start, true)
        } else {
            (self.start, self.end, false)
        };

        let start = low - 1;
        if start < 0 {
            return Err(self.invalid("start must be at least 1"));
        }
        if high <= start {
            return Err(self.invalid("range is empty"));
        }

        Ok(NormalizedSubstring {
            range: start as usize..high as usize,
            implied_revcomp,
        })
    }

    fn invalid(&self, reason: &str) -> Error {
        Error::InvalidRange { start: self.start, end: self.end, reason: reason.to_string() }
    }
}

impl NormalizedSubstring {
    /// Returns the part of `sequence` covered by the range, shorter than
    /// requested if the sequence ends early (empty if it ends before the start).
    pub fn extract<'a>(&self, sequence: &'a str) -> &'a str {
        let len = sequence.len();
        let start = self.range.start.min(len);
        let end = self.range.end.min(len);
        // Input is ASCII; a non-ASCII boundary yields nothing rather than a panic
        sequence.get(start..end).unwrap_or("")
    }
}
