//! # lockflat
//!
//! Flattens nested npm v1 lockfiles into package and dependency lists.
//!
//! This is the main entry point for the lockflat CLI. It handles command
//! parsing, sets up logging and error handling, and dispatches to the
//! appropriate command handlers.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lockflat_core::error::LockflatError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Flatten nested npm lockfiles for vulnerability scanning and SBOM pipelines
#[derive(Parser)]
#[command(name = "lockflat", version, about = "Flatten nested npm lockfiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the flattened packages and dependency edges
    Flatten {
        /// Path to the lockfile
        #[arg(value_name = "LOCKFILE", default_value = "package-lock.json")]
        lockfile: PathBuf,
        /// Output format (json or text)
        #[arg(long)]
        format: Option<String>,
        /// Flatten development-only packages too
        #[arg(long)]
        include_dev: bool,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Report requirements that cannot be resolved
    Check {
        /// Path to the lockfile
        #[arg(value_name = "LOCKFILE", default_value = "package-lock.json")]
        lockfile: PathBuf,
        /// Check development-only packages too
        #[arg(long)]
        include_dev: bool,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting lockflat v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let formatter = ErrorFormatter::new();
            match err.downcast_ref::<LockflatError>() {
                Some(lockflat_error) => eprintln!("{}", formatter.format_error(lockflat_error)),
                None => eprintln!("{}", formatter.format_simple(&format!("{:#}", err))),
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;
        commands::dispatch_command(cli.command, &ctx).await?;
        Ok::<(), anyhow::Error>(())
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lockflat={level},lockflat_config={level},lockflat_lockfile={level},lockflat_resolver={level}"
        ))
    });

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("lockflat encountered an unexpected error: {}", panic_info);
        eprintln!("lockflat crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/lockflat/lockflat/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
