//! Error handlers
//!
//! Logs top-level errors and maps them to process exit codes.

use crate::error::types::{AppError, StorageError};
use log::error;

/// Exit code used when at least one requested name did not resolve
pub const EXIT_NOT_FOUND: u8 = 1;

/// Log an error raised by the command line front end
pub fn handle_error(err: &AppError) {
    error!("Media storage error: {}", err);
}

/// Convert an error to a process exit code
pub fn error_to_exit_code(err: &AppError) -> u8 {
    match err {
        AppError::Config(_) => 2,
        AppError::Storage(StorageError::MediaNotFound(_))
        | AppError::Storage(StorageError::FileNotFound(_)) => EXIT_NOT_FOUND,
        AppError::Storage(_) => 3,
        AppError::Io(_) => 3,
    }
}
