//! Parse-time policy toggles. Passed explicitly to every entry point so that
//! independent parses never share configuration.

/// Controls how strictly a report is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip the FNF/FNH/LF/LH cross-checks against observed data.
    ///
    /// Structural errors (unknown functions, malformed payloads,
    /// unrecognized directives) are still reported.
    pub ignore_incorrect_counts: bool,

    /// Sum the counts of repeated `DA` entries for the same line instead of
    /// rejecting the record.
    pub merge_duplicate_line_hit_counts: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ignore_incorrect_counts(mut self, ignore: bool) -> Self {
        self.ignore_incorrect_counts = ignore;
        self
    }

    #[must_use]
    pub fn with_merge_duplicate_line_hit_counts(mut self, merge: bool) -> Self {
        self.merge_duplicate_line_hit_counts = merge;
        self
    }
}
