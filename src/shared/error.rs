use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (backend failure, unreadable snapshot, file I/O, ...)
    ApplicationError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application errors surfaced to the user.
///
/// Malformed optional fields inside a record never end up here: the record
/// normalizer degrades them to neutral values instead.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Shipment snapshot not found: {path}\n\n💡 Hint: {suggestion}")]
    SnapshotNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse shipment snapshot: {path}\nDetails: {details}\n\n💡 Hint: The snapshot must be a JSON array of records, or an object with a \"records\" array")]
    SnapshotParseError { path: PathBuf, details: String },

    #[error("Backend request failed: {resource}\nDetails: {details}\n\n💡 Hint: Check the backend URL, your API key and the network connection, then retry")]
    BackendRequest { resource: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Invalid filter or request parameters
    #[error("Validation error: {message}")]
    Validation { message: String },
}
