//! App-aware media storage
//!
//! Looks a name up in the project media root first. On a miss it tries the
//! `media` folder of every installed app, last installed first, so a later
//! app can override assets shipped by an earlier one.

use log::{debug, warn};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::apps::{AppRegistry, SharedAppRegistry};
use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::storage::filesystem::{FileSystemStorage, ensure_file};
use crate::storage::results::{AppMediaPath, MediaSource, ResolvedMedia};
use crate::storage::validation::validate_name;

/// Name of the media folder inside every app install directory
pub const APP_MEDIA_DIR: &str = "media";

/// Storage that falls back to installed apps' media folders
#[derive(Debug, Clone)]
pub struct AppMediaStorage {
    base: FileSystemStorage,
    registry: SharedAppRegistry,
}

impl AppMediaStorage {
    /// Build a storage over `registry`. Unset `location` and `base_url`
    /// default to `media_root` and `media_url`.
    pub fn new(
        location: Option<PathBuf>,
        base_url: Option<String>,
        config: &StorageConfig,
        registry: SharedAppRegistry,
    ) -> Self {
        Self {
            base: FileSystemStorage::from_settings(location, base_url, config),
            registry,
        }
    }

    /// Storage and registry both taken from the settings
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let registry = AppRegistry::from_config(config)?.into_shared();
        Ok(Self::new(None, None, config, registry))
    }

    pub fn base(&self) -> &FileSystemStorage {
        &self.base
    }

    pub fn location(&self) -> &Path {
        self.base.location()
    }

    pub fn base_url(&self) -> &str {
        self.base.base_url()
    }

    /// Handle to the registry this storage reads on every lookup
    pub fn registry(&self) -> SharedAppRegistry {
        self.registry.clone()
    }

    /// Candidate app media folders, last installed app first.
    ///
    /// Rebuilt from the registry on every call. Fails on the first app
    /// that cannot be resolved to an install directory.
    pub fn get_media_paths(&self) -> Result<Vec<AppMediaPath>, StorageError> {
        let registry = self
            .registry
            .read()
            .map_err(|_| StorageError::RegistryUnavailable)?;

        registry
            .names()
            .rev()
            .map(|app| -> Result<AppMediaPath, StorageError> {
                let path = registry.install_dir(app)?.join(APP_MEDIA_DIR);
                Ok(AppMediaPath {
                    app: app.to_string(),
                    path,
                })
            })
            .collect()
    }

    /// Find where a name lives, root first, then app media folders
    pub fn resolve(&self, name: &str) -> Result<Option<ResolvedMedia>, StorageError> {
        if self.base.exists(name)? {
            debug!("{} found in media root", name);
            return Ok(Some(ResolvedMedia {
                name: name.to_string(),
                path: self.base.path(name)?,
                source: MediaSource::Root,
            }));
        }

        let relative = validate_name(name)?;
        for candidate in self.get_media_paths()? {
            let file_path = candidate.path.join(relative);
            if file_path.exists() {
                debug!("{} found in media folder of app {}", name, candidate.app);
                return Ok(Some(ResolvedMedia {
                    name: name.to_string(),
                    path: file_path,
                    source: MediaSource::App(candidate.app),
                }));
            }
        }

        debug!("{} not found in any media folder", name);
        Ok(None)
    }

    /// Open a name for reading
    pub fn open(&self, name: &str) -> Result<File, StorageError> {
        self.open_with(name, OpenOptions::new().read(true))
    }

    /// Open a name with explicit options.
    ///
    /// Fails with [`StorageError::MediaNotFound`] when neither the media root
    /// nor any app media folder has the name.
    pub fn open_with(&self, name: &str, options: &OpenOptions) -> Result<File, StorageError> {
        match self.resolve(name)? {
            Some(ResolvedMedia {
                source: MediaSource::Root,
                ..
            }) => self.base.open_with(name, options),
            Some(resolved) => ensure_file(name, options.open(&resolved.path)?),
            None => {
                warn!("Requested media {} does not exist", name);
                Err(StorageError::MediaNotFound(name.to_string()))
            }
        }
    }

    /// Open a name for reading on the tokio runtime. The lookup itself is
    /// synchronous; only the open goes through `tokio::fs`.
    pub async fn open_async(&self, name: &str) -> Result<tokio::fs::File, StorageError> {
        match self.resolve(name)? {
            Some(ResolvedMedia {
                source: MediaSource::Root,
                ..
            }) => self.base.open_async(name).await,
            Some(resolved) => {
                let file = tokio::fs::File::open(&resolved.path).await?;
                if file.metadata().await?.is_dir() {
                    return Err(StorageError::NotAFile(name.to_string()));
                }
                Ok(file)
            }
            None => {
                warn!("Requested media {} does not exist", name);
                Err(StorageError::MediaNotFound(name.to_string()))
            }
        }
    }

    pub fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.resolve(name)?.is_some())
    }

    /// Full path of the file that would be opened, `None` when there is none
    pub fn source_path(&self, name: &str) -> Result<Option<PathBuf>, StorageError> {
        Ok(self.resolve(name)?.map(|resolved| resolved.path))
    }

    /// Public URL of a name under the base URL
    pub fn url(&self, name: &str) -> Result<String, StorageError> {
        self.base.url(name)
    }
}
