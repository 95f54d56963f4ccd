//! # Error Types — Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Schema errors name the exact field path and the expectation violated.
//! - Outcome errors are plain data (`Clone`, `PartialEq`, `Serialize`) so
//!   outcome lists can be compared and rendered as JSON.
//! - Filesystem errors are recorded per path and never carry a location.

use serde::Serialize;
use thiserror::Error;

/// A structural metadata violation, attributable to one block.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{path}: {message}")]
pub struct SchemaError {
    /// Dotted field path of the violating value, e.g. `schema.parameters[1]`.
    pub path: String,
    /// Human-readable expectation that was violated.
    pub message: String,
}

impl SchemaError {
    /// Create a schema error at `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// An error attached to an [`Outcome`](crate::Outcome).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum OutcomeError {
    /// The block's metadata violates the schema.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The block's text is not well-formed YAML.
    #[error("parse error: {0}")]
    Parse(String),

    /// The path could not be stat-ed, listed, or read.
    #[error("io error: {0}")]
    Io(String),
}

impl OutcomeError {
    /// Wrap a filesystem failure.
    pub fn io(err: &std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Error while loading checker configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Read {
        /// Path of the configuration file.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`CheckerConfig`](crate::CheckerConfig).
    #[error("invalid config file '{path}': {source}")]
    Parse {
        /// Path of the configuration file.
        path: String,
        /// Underlying YAML failure.
        #[source]
        source: serde_yaml::Error,
    },

    /// A configuration value is unusable.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
