//! Error types
//!
//! Defines the storage error type and the binary-level error that wraps it.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// A name relative to the base storage root does not exist
    FileNotFound(String),
    /// A name was found neither in the media root nor in any app media folder
    MediaNotFound(String),
    /// The name resolved to a directory where a file was expected
    NotAFile(String),
    InvalidPath(String),
    PathTraversal(String),
    /// An installed app identifier could not be resolved to a directory
    AppNotFound(String),
    DuplicateApp(String),
    RegistryUnavailable,
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {}", name),
            StorageError::MediaNotFound(name) => write!(
                f,
                "The file with name {} could not be found in the media root or any of the installed apps media folders",
                name
            ),
            StorageError::NotAFile(name) => write!(f, "Not a file: {}", name),
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::PathTraversal(p) => write!(f, "Path traversal attempt: {}", p),
            StorageError::AppNotFound(app) => {
                write!(f, "Installed app {} could not be resolved to a directory", app)
            }
            StorageError::DuplicateApp(app) => write!(f, "App already installed: {}", app),
            StorageError::RegistryUnavailable => write!(f, "App registry lock is poisoned"),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Top-level error for the command line front end
#[derive(Debug)]
pub enum AppError {
    Config(config::ConfigError),
    Storage(StorageError),
    Io(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        AppError::Storage(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_not_found_names_the_file_and_every_location() {
        let msg = StorageError::MediaNotFound("missing.png".into()).to_string();
        assert!(msg.contains("missing.png"));
        assert!(msg.contains("media root"));
        assert!(msg.contains("installed apps media folders"));
    }

    #[test]
    fn io_errors_convert_into_storage_errors() {
        let err: StorageError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, StorageError::IoError(_)));
        let app: AppError = err.into();
        assert!(app.to_string().starts_with("Storage error"));
    }
}
