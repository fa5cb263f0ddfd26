//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a
//! CommandContext.

use camino::{Utf8Path, Utf8PathBuf};
use lockflat_config::{ConfigLoader, Settings};
use lockflat_core::error::{LockflatError, LockflatResult};
use lockflat_core::types::Resolution;
use lockflat_resolver::{ResolveOptions, Resolver};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub mod check;
pub mod flatten;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> LockflatResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| LockflatError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            LockflatError::config("cwd", format!("{} is not valid UTF-8", path.display()))
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
        })
    }

    /// Resolve a user-supplied path against the working directory
    pub fn resolve_path(&self, path: &Path) -> LockflatResult<Utf8PathBuf> {
        let path = Utf8Path::from_path(path).ok_or_else(|| {
            LockflatError::config("lockfile", format!("{} is not valid UTF-8", path.display()))
        })?;
        Ok(self.cwd.join(path))
    }

    /// Load settings from config files, environment and CLI overrides
    pub async fn settings(&self, cli_overrides: HashMap<String, String>) -> LockflatResult<Settings> {
        ConfigLoader::new(self.cwd.clone())
            .load_settings(cli_overrides)
            .await
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> LockflatResult<()> {
    match command {
        Commands::Flatten {
            lockfile,
            format,
            include_dev,
            compact,
        } => {
            info!("Flattening {} (include_dev: {})", lockfile.display(), include_dev);
            let args = flatten::FlattenArgs {
                lockfile,
                format,
                include_dev,
                compact,
            };
            flatten::execute(args, ctx).await
        }
        Commands::Check {
            lockfile,
            include_dev,
        } => {
            info!("Checking {} (include_dev: {})", lockfile.display(), include_dev);
            check::execute(lockfile, include_dev, ctx).await
        }
        Commands::Version => show_version(ctx),
    }
}

/// Load a lockfile and flatten it
pub async fn load_resolution(path: &Utf8Path, settings: &Settings) -> LockflatResult<Resolution> {
    let tree = lockflat_lockfile::load_from_file(path).await?;
    let resolver = Resolver::new(ResolveOptions {
        include_dev: settings.include_dev,
    });
    Ok(resolver.resolve(&tree))
}

/// CLI overrides for the `include-dev` switch, only when it was passed
fn include_dev_override(include_dev: bool) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    if include_dev {
        overrides.insert("include-dev".to_string(), "true".to_string());
    }
    overrides
}

fn show_version(ctx: &CommandContext) -> LockflatResult<()> {
    ctx.output.emit(&format!("lockflat v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.emit(&format!("Built: {}", env!("LOCKFLAT_BUILD_DATE")));
    ctx.output.emit(&format!(
        "Target: {}-{}",
        std::env::consts::ARCH,
        std::env::consts::OS
    ));
    ctx.output.emit(&format!("Rust: {}", env!("LOCKFLAT_RUSTC_VERSION")));
    Ok(())
}
