//! # Check Subcommand
//!
//! Walks a snippet library, validates every metadata block, prints the
//! report, and returns the exit status.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use snipcheck_core::{sort_outcomes, CheckerConfig};
use snipcheck_schema::SnippetChecker;
use snipcheck_walker::TreeWalker;

use crate::report::{render, ReportFormat, Summary};

/// Arguments for the `snipcheck check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Library root directory (or a single source file) to check.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Load the checker configuration, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<CheckerConfig> {
    match path {
        Some(path) => {
            let config = CheckerConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::debug!(config = %path.display(), "loaded checker config");
            Ok(config)
        }
        None => Ok(CheckerConfig::default()),
    }
}

/// Execute the check subcommand, writing the report to `out`.
///
/// Returns the exit code: the total number of errors, clamped to 255.
pub async fn run_check<W: Write>(
    args: &CheckArgs,
    config_path: Option<&Path>,
    out: &mut W,
) -> Result<u8> {
    let config = load_config(config_path)?;
    let walker = TreeWalker::with_tokio_fs(SnippetChecker::new(config));

    let mut outcomes = walker
        .walk(&args.root)
        .await
        .with_context(|| format!("failed to walk {}", args.root.display()))?;
    sort_outcomes(&mut outcomes);

    render(args.format, &outcomes, &args.root, out)?;
    out.flush().context("failed to flush report")?;

    let summary = Summary::from_outcomes(&outcomes);
    tracing::info!(
        root = %args.root.display(),
        blocks = summary.outcomes,
        passed = summary.passed,
        failed = summary.failed,
        errors = summary.errors,
        "check summary"
    );
    Ok(summary.exit_code())
}
