//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::FinderError;

/// Exit codes for the hashdupe application.
///
/// - 0: Success (scan completed, with or without duplicates)
/// - 1: General error (unexpected failure)
/// - 2: Invalid root (missing or not a directory)
/// - 3: File read error (a file or directory could not be read)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and the report was written.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid root: The scan root does not exist or is not a directory.
    InvalidRoot = 2,
    /// File read error: A file could not be digested or a directory listed.
    FileReadError = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "HD000",
            Self::GeneralError => "HD001",
            Self::InvalidRoot => "HD002",
            Self::FileReadError => "HD003",
        }
    }

    /// Pick the exit code for a failed run.
    ///
    /// Looks for a [`FinderError`] anywhere in the error chain; anything
    /// else is a general error.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let finder_error = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<FinderError>());

        match finder_error {
            Some(FinderError::PathNotFound(_) | FinderError::NotADirectory(_)) => {
                Self::InvalidRoot
            }
            Some(FinderError::FileRead(_) | FinderError::Scan(_)) => Self::FileReadError,
            None => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "HD002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, causes included
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
