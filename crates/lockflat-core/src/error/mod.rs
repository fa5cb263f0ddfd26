//! Error types and result aliases for lockflat operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the lockflat crates with actionable error messages. Unresolved
//! requirements are not errors here: they are recorded as diagnostics and
//! only become an error when a caller asks for a strict check.

use thiserror::Error;

/// Unified error type for all lockflat operations
#[derive(Error, Debug)]
pub enum LockflatError {
    // Lockfile errors
    #[error("Failed to decode package-lock.json: {message}")]
    LockfileDecode { message: String },

    #[error("Failed to serialize output: {message}")]
    Serialize { message: String },

    // Config errors
    #[error("Failed to parse lockflat.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Resolution errors
    #[error("{count} requirement(s) could not be resolved to an installed version")]
    UnresolvedRequirements { count: usize },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for lockflat operations
pub type LockflatResult<T> = Result<T, LockflatError>;

impl LockflatError {
    /// Create a decode error from any displayable cause
    pub fn decode(message: impl std::fmt::Display) -> Self {
        Self::LockfileDecode {
            message: message.to_string(),
        }
    }

    /// Create a serialization error from any displayable cause
    pub fn serialize(message: impl std::fmt::Display) -> Self {
        Self::Serialize {
            message: message.to_string(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a configuration validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            LockflatError::LockfileDecode { .. } => Some(
                "Make sure the file is an npm v1 package-lock.json (lockfileVersion 1) with a top-level \"dependencies\" map",
            ),
            LockflatError::TomlParse { .. } => Some("Check lockflat.toml for syntax errors"),
            LockflatError::UnresolvedRequirements { .. } => Some(
                "Regenerate the lockfile with 'npm install' or run 'lockflat flatten' to accept a partial graph",
            ),
            LockflatError::Io { .. } => Some("Check that the path exists and is readable"),
            _ => None,
        }
    }
}
