//! # snipcheck-core — Foundational Types
//!
//! Shared vocabulary for the snipcheck workspace. Every other crate depends
//! on `snipcheck-core`; it depends on nothing internal.
//!
//! ## Key Types
//!
//! 1. **[`SourceLocation`]** — 1-based line of a metadata marker comment.
//!    Zero is unrepresentable.
//!
//! 2. **[`MetadataBlock`]** — one reassembled run of marker-tagged comment
//!    lines, ready for YAML parsing.
//!
//! 3. **[`Outcome`]** — the pass/fail record for one block or one file-level
//!    failure. The list of outcomes is the only externally visible result
//!    of a run.
//!
//! 4. **[`CheckerConfig`]** — comment sentinel, start marker, and source
//!    suffix, loadable from YAML.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `snipcheck-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod location;
pub mod outcome;

pub use config::CheckerConfig;
pub use error::{ConfigError, OutcomeError, SchemaError};
pub use location::{MetadataBlock, SourceLocation};
pub use outcome::{sort_outcomes, Outcome};
