//! # Checker Configuration
//!
//! Controls how source files are recognized and how metadata blocks are
//! found inside them. Every field has a default, so an absent or empty
//! configuration file checks `.rego` files for `# METADATA: library-snippet`
//! blocks.
//!
//! ```yaml
//! comment_prefix: "#"
//! marker: "METADATA: library-snippet"
//! source_suffix: ".rego"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default comment sentinel.
pub const DEFAULT_COMMENT_PREFIX: &str = "#";
/// Default start marker for metadata blocks.
pub const DEFAULT_MARKER: &str = "METADATA: library-snippet";
/// Default suffix of files that are checked.
pub const DEFAULT_SOURCE_SUFFIX: &str = ".rego";

/// Settings shared by the extractor and the tree walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// A line is a comment when, trimmed, it starts with this prefix.
    pub comment_prefix: String,
    /// Comment content that opens a metadata block.
    pub marker: String,
    /// Only files whose name ends with this suffix are read.
    pub source_suffix: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
        }
    }
}

impl CheckerConfig {
    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
                path: origin.to_string(),
                source,
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text, &path.display().to_string())
    }

    /// Reject values the extractor or walker cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("comment_prefix", &self.comment_prefix),
            ("marker", &self.marker),
            ("source_suffix", &self.source_suffix),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether a file name carries the source suffix. A name that is only
    /// the suffix (e.g. `.rego`) does not count.
    pub fn is_source_file_name(&self, name: &str) -> bool {
        name.len() > self.source_suffix.len() && name.ends_with(&self.source_suffix)
    }
}
