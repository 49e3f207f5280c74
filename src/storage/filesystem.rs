//! File system storage
//!
//! Read-side storage rooted at a single directory with a public base URL.

use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::storage::validation::validate_name;

/// Characters left unescaped in URLs besides alphanumerics
const URL_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b'\'');

/// Storage for files under one root directory
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    location: PathBuf,
    base_url: String,
}

impl FileSystemStorage {
    pub fn new(location: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.is_empty() && !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            location: location.into(),
            base_url,
        }
    }

    /// Storage whose unset location and base URL default to the media settings
    pub fn from_settings(
        location: Option<PathBuf>,
        base_url: Option<String>,
        config: &StorageConfig,
    ) -> Self {
        Self::new(
            location.unwrap_or_else(|| config.media_root_path()),
            base_url.unwrap_or_else(|| config.media_url.clone()),
        )
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full filesystem path of a name
    pub fn path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let relative = validate_name(name)?;
        Ok(self.location.join(relative))
    }

    pub fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.path(name)?;
        let found = path.exists();
        debug!("Root probe {} -> {}", path.display(), found);
        Ok(found)
    }

    /// Open a name for reading
    pub fn open(&self, name: &str) -> Result<File, StorageError> {
        self.open_with(name, OpenOptions::new().read(true))
    }

    pub fn open_with(&self, name: &str, options: &OpenOptions) -> Result<File, StorageError> {
        let path = self.path(name)?;
        let file = options.open(&path).map_err(|e| not_found_or_io(name, e))?;
        ensure_file(name, file)
    }

    /// Open a name for reading on the tokio runtime
    pub async fn open_async(&self, name: &str) -> Result<tokio::fs::File, StorageError> {
        let path = self.path(name)?;
        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| not_found_or_io(name, e))?;
        if file.metadata().await?.is_dir() {
            return Err(StorageError::NotAFile(name.to_string()));
        }
        Ok(file)
    }

    /// Size of a name in bytes
    pub fn size(&self, name: &str) -> Result<u64, StorageError> {
        let path = self.path(name)?;
        let metadata = fs::metadata(&path).map_err(|e| not_found_or_io(name, e))?;
        Ok(metadata.len())
    }

    /// Public URL of a name
    pub fn url(&self, name: &str) -> Result<String, StorageError> {
        validate_name(name)?;
        let uri = name
            .replace('\\', "/")
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!(
            "{}{}",
            self.base_url,
            utf8_percent_encode(&uri, URL_PATH)
        ))
    }
}

/// Reject handles that refer to a directory
pub(crate) fn ensure_file(name: &str, file: File) -> Result<File, StorageError> {
    if file.metadata()?.is_dir() {
        return Err(StorageError::NotAFile(name.to_string()));
    }
    Ok(file)
}

fn not_found_or_io(name: &str, error: io::Error) -> StorageError {
    if error.kind() == io::ErrorKind::NotFound {
        StorageError::FileNotFound(name.to_string())
    } else {
        StorageError::IoError(error)
    }
}
