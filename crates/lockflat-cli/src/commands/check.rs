//! `lockflat check` command implementation.

use lockflat_core::error::{LockflatError, LockflatResult};
use std::path::PathBuf;

use super::{include_dev_override, load_resolution, CommandContext};

/// Execute the `lockflat check` command
///
/// Fails when any requirement could not be matched to an installed version.
pub async fn execute(lockfile: PathBuf, include_dev: bool, ctx: &CommandContext) -> LockflatResult<()> {
    let settings = ctx.settings(include_dev_override(include_dev)).await?;
    let path = ctx.resolve_path(&lockfile)?;
    let resolution = load_resolution(&path, &settings).await?;

    ctx.output.info(&format!(
        "{}: {} packages, {} dependency edges",
        path,
        resolution.libraries.len(),
        resolution.edges.len()
    ));

    let count = resolution.unresolved_count();
    if count == 0 {
        ctx.output.success("All requirements resolve to installed versions");
        return Ok(());
    }

    for diagnostic in &resolution.diagnostics {
        ctx.output.warn(&diagnostic.to_string());
    }
    Err(LockflatError::UnresolvedRequirements { count })
}
