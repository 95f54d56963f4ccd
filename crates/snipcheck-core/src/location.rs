//! # Source Locations and Metadata Blocks

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 1-based line number of the comment that opens a metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    line: NonZeroUsize,
}

impl SourceLocation {
    /// Build a location from a 1-based line number. Returns `None` for zero.
    pub fn new(line: usize) -> Option<Self> {
        NonZeroUsize::new(line).map(|line| Self { line })
    }

    /// Build a location from a 0-based line index.
    pub fn from_index(index: usize) -> Self {
        Self {
            line: NonZeroUsize::MIN.saturating_add(index),
        }
    }

    /// The 1-based line number.
    pub fn line(&self) -> usize {
        self.line.get()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.line)
    }
}

/// A contiguous run of marker-tagged comment lines, reassembled into one
/// YAML document.
///
/// `raw_text` holds the de-prefixed content of every line after the marker,
/// each followed by `\n`. `end_line` is the last comment line consumed by
/// the block (equal to the marker line when the block has no content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataBlock {
    /// File the block was found in.
    pub filename: PathBuf,
    /// Line of the marker comment.
    pub location: SourceLocation,
    /// Last line consumed by the block.
    pub end_line: usize,
    /// De-prefixed, newline-joined comment content.
    pub raw_text: String,
}

impl MetadataBlock {
    /// Inclusive line span `(first, last)` covered by the block.
    pub fn span(&self) -> (usize, usize) {
        (self.location.line(), self.end_line)
    }
}
