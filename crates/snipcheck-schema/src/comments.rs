//! # Comment Tokenizer
//!
//! Splits file text into lines and keeps the comment lines, each with its
//! 0-based line index and the text after the comment prefix.

/// One comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment<'a> {
    /// 0-based index of the line in the file.
    pub index: usize,
    /// Trimmed line with the first comment prefix removed.
    pub value: &'a str,
}

/// Collect the comment lines of `text`. A line is a comment when, after
/// trimming, it starts with `prefix`.
pub fn tokenize<'a>(text: &'a str, prefix: &str) -> Vec<Comment<'a>> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            line.trim()
                .strip_prefix(prefix)
                .map(|value| Comment { index, value })
        })
        .collect()
}
