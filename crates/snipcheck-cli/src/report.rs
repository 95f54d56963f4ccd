//! # Report Rendering
//!
//! Turns a sorted outcome list into the text or JSON report on stdout.
//!
//! Text format, one entry per outcome:
//!
//! ```text
//! PASS .../kubernetes/registries.rego:3
//! FAIL .../kubernetes/limits.rego:15
//! --> schema error: schema.parameters[0].default: number parameter "max": default should be a number
//!     title: Broken
//!     schema:
//!       ...
//! ```

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use snipcheck_core::Outcome;

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// PASS/FAIL lines with error messages and the offending block.
    #[default]
    Text,
    /// The sorted outcome list as a JSON array.
    Json,
}

/// Totals across one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub outcomes: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut summary = Self {
            outcomes: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            if outcome.passed() {
                summary.passed += 1;
            } else {
                summary.failed += 1;
                summary.errors += outcome.errors.len();
            }
        }
        summary
    }

    /// Process exit status: the total error count, clamped to `u8`.
    pub fn exit_code(&self) -> u8 {
        u8::try_from(self.errors).unwrap_or(u8::MAX)
    }
}

/// Display a path with the checked root replaced by `...`.
pub fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rest) if rest.as_os_str().is_empty() => "...".to_string(),
        Ok(rest) => format!(".../{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Write the report for already sorted outcomes.
pub fn render<W: Write>(
    format: ReportFormat,
    outcomes: &[Outcome],
    root: &Path,
    out: &mut W,
) -> Result<()> {
    match format {
        ReportFormat::Text => render_text(outcomes, root, out),
        ReportFormat::Json => render_json(outcomes, out),
    }
}

fn render_text<W: Write>(outcomes: &[Outcome], root: &Path, out: &mut W) -> Result<()> {
    for outcome in outcomes {
        let status = if outcome.passed() { "PASS" } else { "FAIL" };
        let mut heading = format!("{status} {}", display_path(&outcome.filename, root));
        if let Some(line) = outcome.line() {
            heading.push_str(&format!(":{line}"));
        }
        writeln!(out, "{heading}").context("failed to write report")?;

        if outcome.passed() {
            continue;
        }
        for error in &outcome.errors {
            writeln!(out, "--> {error}").context("failed to write report")?;
        }
        for line in outcome.raw_text.lines() {
            writeln!(out, "    {line}").context("failed to write report")?;
        }
    }
    Ok(())
}

fn render_json<W: Write>(outcomes: &[Outcome], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcomes).context("failed to serialize report")?;
    writeln!(out).context("failed to write report")?;
    Ok(())
}
