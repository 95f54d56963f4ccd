//! # snipcheck-schema — Block Extraction & Snippet Schema Validation
//!
//! Turns the text of one policy source file into a list of
//! [`Outcome`](snipcheck_core::Outcome)s.
//!
//! ## Extraction (`comments`, `extract`)
//!
//! [`comments::tokenize`] flags comment lines; [`extract::extract_blocks`]
//! finds every comment starting with the configured marker and merges the
//! immediately following comment lines into one YAML document, recording the
//! marker's line.
//!
//! ## Validation (`model`, `validate`)
//!
//! [`validate::validate_metadata`] parses a block and type-checks it into a
//! [`SnippetMetadata`]. Parameter and decision types are closed enums, so an
//! unknown tag can never be accepted silently. Validation stops at the first
//! violation: a failing block carries exactly one schema error.
//!
//! ## Checking (`check`)
//!
//! [`SnippetChecker::check_source`] runs both stages over a file and builds
//! one outcome per block.

pub mod check;
pub mod comments;
pub mod extract;
pub mod model;
pub mod validate;

pub use check::SnippetChecker;
pub use extract::extract_blocks;
pub use model::{
    DecisionEntry, ItemsSource, ObjectDefaultValue, ObjectParameter, Parameter, ParameterCommon,
    PolicyBinding, QuerySource, SnippetMetadata, ToggleSpec, ValueType,
};
pub use validate::{validate_metadata, BlockError};
