//! lockflat.toml configuration parsing and serialization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ConfigResult;
use lockflat_core::error::LockflatError;

/// Contents of one lockflat.toml file
///
/// Every value is optional so that a file only overrides what it sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockflatToml {
    /// Resolution options
    #[serde(default)]
    pub resolve: ResolveSection,

    /// Output options
    #[serde(default)]
    pub output: OutputSection,
}

/// `[resolve]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResolveSection {
    /// Flatten development-only packages too
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_dev: Option<bool>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputSection {
    /// Output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

/// How the flattened graph is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{"libraries": [...], "dependencies": [...]}`
    #[default]
    Json,
    /// One line per library and edge
    Text,
}

/// Effective settings after layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub include_dev: bool,
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_dev: false,
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

impl Settings {
    /// Overlay the values a file sets
    pub fn apply(&mut self, file: &LockflatToml) {
        if let Some(include_dev) = file.resolve.include_dev {
            self.include_dev = include_dev;
        }
        if let Some(format) = file.output.format {
            self.format = format;
        }
        if let Some(pretty) = file.output.pretty {
            self.pretty = pretty;
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LockflatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(LockflatError::config(
                "output.format",
                format!("unknown format '{}', expected 'json' or 'text'", other),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

/// Parse TOML string to lockflat.toml configuration
pub fn parse_config(content: &str) -> ConfigResult<LockflatToml> {
    toml::from_str(content).map_err(|e| LockflatError::TomlParse {
        message: format!("TOML parsing error: {}", e),
    })
}

/// Serialize configuration to a TOML string
pub fn serialize_config(config: &LockflatToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| LockflatError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Parse a boolean override such as `LOCKFLAT_INCLUDE_DEV=1`
pub fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LockflatError::config(
            field,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

/// Load and parse lockflat.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<LockflatToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LockflatError::io(format!("Failed to read {}", path), e))?;

    parse_config(&content).map_err(|e| match e {
        LockflatError::TomlParse { message } => LockflatError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}
