//! # Block Extractor
//!
//! A metadata block opens at a comment whose content starts with the marker
//! and extends over every immediately following comment line. The first
//! line that is not a comment ends it, so blocks in one file never overlap.
//!
//! ```text
//!  1  # METADATA: library-snippet     <- block location
//!  2  # title: Deny privileged pods   <- raw_text line 1
//!  3  # description: ...              <- raw_text line 2
//!  4  package rules                   <- ends the block
//! ```

use std::path::Path;

use snipcheck_core::{CheckerConfig, MetadataBlock, SourceLocation};

use crate::comments::{tokenize, Comment};

/// Extract every metadata block from `text`.
pub fn extract_blocks(filename: &Path, text: &str, config: &CheckerConfig) -> Vec<MetadataBlock> {
    let comments = tokenize(text, &config.comment_prefix);
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < comments.len() {
        let head = &comments[i];
        i += 1;
        if !is_marker(head, &config.marker) {
            continue;
        }

        let mut end = head.index;
        let mut raw_text = String::new();
        while let Some(next) = comments.get(i) {
            if next.index != end + 1 {
                break;
            }
            end = next.index;
            raw_text.push_str(next.value.strip_prefix(' ').unwrap_or(next.value));
            raw_text.push('\n');
            i += 1;
        }

        tracing::trace!(
            file = %filename.display(),
            line = head.index + 1,
            end_line = end + 1,
            "extracted metadata block"
        );

        blocks.push(MetadataBlock {
            filename: filename.to_path_buf(),
            location: SourceLocation::from_index(head.index),
            end_line: end + 1,
            raw_text,
        });
    }

    blocks
}

fn is_marker(comment: &Comment<'_>, marker: &str) -> bool {
    comment.value.trim_start().starts_with(marker)
}
