//! `lockflat flatten` command implementation.
//!
//! Prints every resolved package and dependency edge of a lockfile, as JSON
//! for pipelines or as a plain listing for people.

use lockflat_config::{OutputFormat, Settings};
use lockflat_core::error::{LockflatError, LockflatResult};
use lockflat_core::types::Resolution;
use std::fmt::Write;
use std::path::PathBuf;

use super::{include_dev_override, load_resolution, CommandContext};

/// Arguments of the flatten command
pub struct FlattenArgs {
    pub lockfile: PathBuf,
    pub format: Option<String>,
    pub include_dev: bool,
    pub compact: bool,
}

/// Execute the `lockflat flatten` command
pub async fn execute(args: FlattenArgs, ctx: &CommandContext) -> LockflatResult<()> {
    let mut overrides = include_dev_override(args.include_dev);
    if let Some(format) = args.format {
        overrides.insert("format".to_string(), format);
    }
    if args.compact {
        overrides.insert("pretty".to_string(), "false".to_string());
    }

    let settings = ctx.settings(overrides).await?;
    let path = ctx.resolve_path(&args.lockfile)?;
    let resolution = load_resolution(&path, &settings).await?;

    let unresolved = resolution.unresolved_count();
    if unresolved > 0 {
        ctx.output.warn(&format!(
            "{} requirement(s) could not be resolved; run 'lockflat check' for details",
            unresolved
        ));
    }

    ctx.output.emit(&render(&resolution, &settings)?);
    Ok(())
}

/// Render a resolution in the configured format
pub fn render(resolution: &Resolution, settings: &Settings) -> LockflatResult<String> {
    match settings.format {
        OutputFormat::Json => render_json(resolution, settings.pretty),
        OutputFormat::Text => Ok(render_text(resolution)),
    }
}

fn render_json(resolution: &Resolution, pretty: bool) -> LockflatResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(resolution)
    } else {
        serde_json::to_string(resolution)
    };
    rendered.map_err(LockflatError::serialize)
}

fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "libraries ({}):", resolution.libraries.len());
    for library in &resolution.libraries {
        let _ = writeln!(out, "  {}", library);
    }

    let _ = writeln!(out, "dependencies ({}):", resolution.edges.len());
    for edge in &resolution.edges {
        let targets: Vec<String> = edge.depends_on.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "  {} -> {}", edge.id, targets.join(", "));
    }

    out.trim_end().to_string()
}
