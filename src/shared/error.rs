use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A run with some failed directories still succeeds; only a run that
/// scanned nothing at all reports `NoDirectoriesScanned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// At least one directory was scanned and the artifact was written
    Success = 0,
    /// No directory could be scanned (none found, or every scan failed)
    NoDirectoriesScanned = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (bad root path, unwritable output, invalid config, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed run by inspecting the error chain
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<SweepError>() {
            Some(SweepError::NoDirectoriesScanned { .. }) => ExitCode::NoDirectoriesScanned,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoDirectoriesScanned => write!(f, "No Directories Scanned (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for requirements consolidation.
///
/// The first four variants are recoverable: the use case reports them and
/// moves on to the next directory, file or line. The rest end the run.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Failed to traverse {path}\nDetails: {details}\n\n💡 Hint: The subtree was skipped. Check the directory permissions")]
    TraversalError { path: PathBuf, details: String },

    #[error("pipreqs failed for {path}\nDetails: {details}\n\n💡 Hint: Run pipreqs manually in that folder to see the full output")]
    ToolInvocationError { path: PathBuf, details: String },

    #[error("Failed to decode requirements output: {path}\nDetails: {details}\n\n💡 Hint: The file was skipped")]
    EncodingError { path: PathBuf, details: String },

    #[error("Malformed requirement line {line_number} in {source_name}: '{line}'\nDetails: {details}")]
    ParseError {
        source_name: String,
        line_number: usize,
        line: String,
        details: String,
    },

    #[error("No directories could be scanned under {root}\nReason: {reason}\n\n💡 Hint: Make sure pipreqs is installed and the folder contains .py files outside virtual environments")]
    NoDirectoriesScanned { root: PathBuf, reason: String },

    #[error("Invalid root path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid directory to scan")]
    InvalidRootPath { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for user supplied patterns and options
    #[error("Validation error: {message}")]
    Validation { message: String },
}
