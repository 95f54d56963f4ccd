//! # snipcheck-cli — Snippet Metadata Checker
//!
//! Command-line front end over the walker and validator crates.
//!
//! ## Subcommands
//!
//! - `check` — walk a library, validate every metadata block, print a
//!   PASS/FAIL report, exit with the number of errors
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live here.
//! - The report goes to stdout, logs go to stderr.
//! - Fatal errors are `anyhow` errors with context; they exit with
//!   [`FATAL_EXIT_CODE`].
//!
//! ## Exit Status
//!
//! A completed run exits with its error count, clamped to 255. A fatal
//! error exits 1, the same status as a run with one error; the two are told
//! apart by stdout, which stays empty when the run is fatal.

pub mod check;
pub mod report;

/// Exit status of a run that could not produce a report.
pub const FATAL_EXIT_CODE: u8 = 1;
