//! # Source Checker
//!
//! Extracts every metadata block of a file and validates each one
//! independently. A failing block never stops the blocks after it.

use std::path::Path;

use snipcheck_core::{CheckerConfig, Outcome};

use crate::extract::extract_blocks;
use crate::validate::validate_metadata;

/// Runs extraction and validation with one configuration.
#[derive(Debug, Clone, Default)]
pub struct SnippetChecker {
    config: CheckerConfig,
}

impl SnippetChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Whether a file name should be checked at all.
    pub fn accepts_file_name(&self, name: &str) -> bool {
        self.config.is_source_file_name(name)
    }

    /// Check one file's text. Returns one outcome per metadata block, in
    /// file order; a file without blocks yields nothing.
    pub fn check_source(&self, filename: &Path, text: &str) -> Vec<Outcome> {
        extract_blocks(filename, text, &self.config)
            .iter()
            .map(|block| {
                let mut outcome = Outcome::for_block(block);
                match validate_metadata(&block.raw_text) {
                    Ok(metadata) => {
                        tracing::debug!(
                            file = %filename.display(),
                            line = block.location.line(),
                            title = %metadata.title,
                            "metadata block passed"
                        );
                    }
                    Err(err) => {
                        tracing::debug!(
                            file = %filename.display(),
                            line = block.location.line(),
                            error = %err,
                            "metadata block failed"
                        );
                        outcome.push_error(err);
                    }
                }
                outcome
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipcheck_core::OutcomeError;

    const SNIPPET: &str = "\
package library.kubernetes

# METADATA: library-snippet
# title: Restrict registries
# description: Only allow images from approved registries
# schema:
#   parameters:
#     - name: registries
#       type: set_of_strings
#       default: [gcr.io]
deny[msg] {
  true
}

# METADATA: library-snippet
# title: Broken
# description: Wrong default
# schema:
#   parameters:
#     - name: max
#       type: number
#       default: lots
limit[msg] {
  true
}
";

    #[test]
    fn one_outcome_per_block_in_file_order() {
        let checker = SnippetChecker::default();
        let outcomes = checker.check_source(Path::new("lib/registries.rego"), SNIPPET);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].line(), Some(3));
        assert!(outcomes[0].passed());
        assert_eq!(outcomes[1].line(), Some(15));
        assert_eq!(outcomes[1].errors.len(), 1);
        assert!(matches!(outcomes[1].errors[0], OutcomeError::Schema(_)));
    }

    #[test]
    fn outcome_keeps_raw_text() {
        let outcomes = SnippetChecker::default().check_source(Path::new("a.rego"), SNIPPET);
        assert!(outcomes[1].raw_text.starts_with("title: Broken\n"));
    }

    #[test]
    fn file_without_blocks_yields_no_outcomes() {
        let outcomes =
            SnippetChecker::default().check_source(Path::new("a.rego"), "package x\n# note\n");
        assert!(outcomes.is_empty());
    }

    #[test]
    fn empty_block_fails() {
        let outcomes = SnippetChecker::default()
            .check_source(Path::new("a.rego"), "# METADATA: library-snippet\npackage x\n");
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].passed());
    }

    #[test]
    fn parse_error_is_recorded_on_block() {
        let text = "# METADATA: library-snippet\n# title: [oops\n";
        let outcomes = SnippetChecker::default().check_source(Path::new("a.rego"), text);
        assert!(matches!(outcomes[0].errors[0], OutcomeError::Parse(_)));
    }

    #[test]
    fn accepts_only_source_suffix() {
        let checker = SnippetChecker::default();
        assert!(checker.accepts_file_name("x.rego"));
        assert!(!checker.accepts_file_name("x.yaml"));
    }
}
