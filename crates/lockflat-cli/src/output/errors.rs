//! Error message formatting with actionable suggestions.

use super::colors::ColorSupport;
use lockflat_core::error::LockflatError;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    #[cfg(test)]
    fn plain() -> Self {
        Self {
            colors: ColorSupport::disabled(),
        }
    }

    /// Format an error with its suggestion and source chain
    pub fn format_error(&self, error: &LockflatError) -> String {
        let mut output = format!("{}: {}", self.colors.red("error"), error);

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("\n{}: {}", self.colors.dim("help"), suggestion));
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&format!("\n{}: {}", self.colors.dim("caused by"), err));
            source = err.source();
        }

        output
    }

    /// Format a simple error message
    pub fn format_simple(&self, message: &str) -> String {
        format!("{}: {}", self.colors.red("error"), message)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_with_suggestion_and_source() {
        let formatter = ErrorFormatter::plain();
        let error = LockflatError::io(
            "Failed to read package-lock.json".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );

        let formatted = formatter.format_error(&error);
        assert!(formatted.starts_with("error: IO error: Failed to read package-lock.json"));
        assert!(formatted.contains("help: Check that the path exists"));
        assert!(formatted.contains("caused by: No such file"));
    }

    #[test]
    fn test_format_simple() {
        let formatter = ErrorFormatter::plain();
        assert_eq!(formatter.format_simple("boom"), "error: boom");
    }
}
