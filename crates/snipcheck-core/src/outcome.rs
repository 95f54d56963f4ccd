//! # Outcomes
//!
//! The pass/fail record for one metadata block, or for one path that could
//! not be read. An outcome with no errors passed; an outcome with one or
//! more errors failed. There is no third state.

use std::cmp::Ordering;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::OutcomeError;
use crate::location::{MetadataBlock, SourceLocation};

/// Result of checking one block or one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// File (or directory) the outcome is attributed to.
    pub filename: PathBuf,
    /// Marker line; `None` for file-level failures.
    pub location: Option<SourceLocation>,
    /// Block text; empty for file-level failures.
    pub raw_text: String,
    /// Errors in the order they were recorded.
    pub errors: Vec<OutcomeError>,
}

impl Outcome {
    /// Start an outcome for a block. It passes until an error is pushed.
    pub fn for_block(block: &MetadataBlock) -> Self {
        Self {
            filename: block.filename.clone(),
            location: Some(block.location),
            raw_text: block.raw_text.clone(),
            errors: Vec::new(),
        }
    }

    /// A file-level failure with no location.
    pub fn file_failure(filename: impl Into<PathBuf>, error: OutcomeError) -> Self {
        Self {
            filename: filename.into(),
            location: None,
            raw_text: String::new(),
            errors: vec![error],
        }
    }

    /// Record an error.
    pub fn push_error(&mut self, error: impl Into<OutcomeError>) {
        self.errors.push(error.into());
    }

    /// Whether validation passed.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// The 1-based marker line, if any.
    pub fn line(&self) -> Option<usize> {
        self.location.map(|l| l.line())
    }

    /// Report ordering: filename first, then line. File-level outcomes sort
    /// before located outcomes of the same file.
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.filename
            .cmp(&other.filename)
            .then_with(|| self.location.cmp(&other.location))
    }
}

/// Sort outcomes into report order in place.
pub fn sort_outcomes(outcomes: &mut [Outcome]) {
    outcomes.sort_by(Outcome::report_order);
}
