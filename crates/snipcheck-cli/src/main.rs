//! # snipcheck CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to the
//! subcommand handlers on a tokio runtime.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snipcheck_cli::check::{run_check, CheckArgs};
use snipcheck_cli::FATAL_EXIT_CODE;

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0      every metadata block passed
  1-255  number of errors found, clamped to 255
  1      also used for fatal errors (bad config, aborted walk); these print
         no report on stdout and log the cause on stderr";

/// Checker for library-snippet metadata blocks in policy source trees.
#[derive(Parser, Debug)]
#[command(
    name = "snipcheck",
    version,
    about,
    long_about = None,
    after_long_help = EXIT_STATUS_HELP
)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML checker configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every metadata block under a library root.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "snipcheck starting");

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
        .and_then(|runtime| {
            runtime.block_on(async {
                match cli.command {
                    Commands::Check(args) => {
                        let stdout = std::io::stdout();
                        let mut out = stdout.lock();
                        run_check(&args, cli.config.as_deref(), &mut out).await
                    }
                }
            })
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}
