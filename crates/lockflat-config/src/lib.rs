//! Configuration parsing for lockflat
//!
//! This crate handles parsing and validation of lockflat.toml files and
//! layers them with environment variables and command-line flags into the
//! effective [`Settings`].

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource};
pub use toml::{LockflatToml, OutputFormat, OutputSection, ResolveSection, Settings};

use lockflat_core::error::LockflatError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, LockflatError>;
