//! Label filter used to fetch a subset of records.

use crate::error::Result;
use log::debug;
use regex::Regex;

/// Selects records whose label contains a pattern.
///
/// The pattern is tried as a regular expression first; if it does not
/// compile it is matched as a literal substring. Matching is containment,
/// not a full match: `seq` matches `seqA` as well as `my_seq_1`.
///
/// # Example
/// ```
/// use nexalign::filter::FetchFilter;
///
/// let filter = FetchFilter::new("seq").unwrap();
/// assert!(filter.matches("seqA"));
/// assert!(!filter.matches("outgroup1"));
/// ```
#[derive(Debug, Clone)]
pub struct FetchFilter {
    pattern: String,
    regex: Regex,
}

impl FetchFilter {
    /// Creates a filter from a regex or literal pattern.
    ///
    /// # Errors
    /// Returns [Error::InvalidFilter](crate::Error::InvalidFilter) only if even
    /// the escaped literal pattern cannot be compiled (e.g. it exceeds the
    /// regex size limit).
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                debug!("Fetch pattern '{pattern}' is no regex ({e}), matching literally");
                Regex::new(&regex::escape(pattern))?
            }
        };
        Ok(FetchFilter { pattern: pattern.to_string(), regex })
    }

    /// Returns whether `label` contains the pattern.
    pub fn matches(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }

    /// Returns the pattern as given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_pattern() {
        let filter = FetchFilter::new("^seq[AB]$").unwrap();
        assert!(filter.matches("seqA"));
        assert!(!filter.matches("seqC"));
        assert!(!filter.matches("xseqA"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let filter = FetchFilter::new("taxon[1").unwrap();
        assert!(filter.matches("my_taxon[1_b"));
        assert!(!filter.matches("taxon1"));
    }
}
