//! Shared CLI plumbing: error type and exit codes.

use std::fmt;
use std::path::Path;

use crate::content::Content;

/// Process exit codes used by the subcommands.
pub struct ExitCode;

impl ExitCode {
    /// Command succeeded
    pub const SUCCESS: i32 = 0;
    /// Input was readable but failed validation
    pub const VALIDATION: i32 = 1;
    /// A file could not be read, parsed or written
    pub const IO: i32 = 2;
}

/// Failure category of a CLI command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Content or arguments failed validation
    Validation,
    /// Read, parse, serialize or write failure
    Io,
}

/// Error returned by a subcommand, carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind {
            CliErrorKind::Validation => ExitCode::VALIDATION,
            CliErrorKind::Io => ExitCode::IO,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Reads and parses a content table without validating it.
///
/// `None` selects the built-in table. Read and parse failures map to
/// [`ExitCode::IO`].
pub fn read_content(path: Option<&Path>) -> CliResult<Content> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::io(format!("Failed to read content file {}: {e}", path.display()))
            })?;
            Content::parse(&text).map_err(|e| CliError::io(format!("{e:#}")))
        }
        None => Content::builtin().map_err(|e| CliError::io(format!("{e:#}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code(), 1);
        assert_eq!(CliError::io("missing").exit_code(), 2);
        assert_eq!(ExitCode::SUCCESS, 0);
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(CliError::io("Failed to read").to_string(), "Failed to read");
    }

    #[test]
    fn test_missing_content_file_is_io_error() {
        let err = read_content(Some(Path::new("/nonexistent/portfolio.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::IO);
    }

    #[test]
    fn test_malformed_content_file_is_io_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio.toml");
        std::fs::write(&path, "[profile\nname = ").unwrap();
        let err = read_content(Some(&path)).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::IO);
    }
}
