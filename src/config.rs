//! Configuration management for the media storage
//!
//! Settings come from `config.toml` with `MEDIA_STORAGE_*` environment
//! overrides for the scalar values. The loaded configuration is immutable;
//! the app list seeds an [`AppRegistry`](crate::apps::AppRegistry) that the
//! host may change afterwards.

use config::{Config, Environment, File, FileFormat};
use log::info;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "MEDIA_STORAGE";

/// Storage settings consumed by the media locator
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Project media root, checked before any app media folder
    /// Environment: MEDIA_STORAGE_MEDIA_ROOT
    pub media_root: String,

    /// Public URL prefix for files under the media root
    /// Environment: MEDIA_STORAGE_MEDIA_URL
    pub media_url: String,

    /// Base directory for resolving dotted app identifiers
    /// Environment: MEDIA_STORAGE_APPS_ROOT
    #[serde(default)]
    pub apps_root: Option<String>,

    /// Installed apps in install order
    #[serde(default)]
    pub installed_apps: Vec<AppEntry>,
}

/// One `[[installed_apps]]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,

    /// Explicit install directory; resolved under `apps_root` when absent
    #[serde(default)]
    pub path: Option<String>,
}

impl StorageConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a named file (extension optional)
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .add_source(env_overrides())
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        info!(
            "Loaded storage configuration from {} ({} installed apps)",
            path,
            config.installed_apps.len()
        );
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration in code, as hosts embedding the library do
    pub fn new(media_root: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            media_root: media_root.into(),
            media_url: media_url.into(),
            apps_root: None,
            installed_apps: Vec::new(),
        }
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.media_root.is_empty() {
            return Err(config::ConfigError::Message(
                "media_root cannot be empty".into(),
            ));
        }

        if !self.media_url.is_empty() && !self.media_url.ends_with('/') {
            return Err(config::ConfigError::Message(format!(
                "media_url must end with a slash: {}",
                self.media_url
            )));
        }

        if matches!(&self.apps_root, Some(root) if root.is_empty()) {
            return Err(config::ConfigError::Message(
                "apps_root cannot be empty when set".into(),
            ));
        }

        for (index, app) in self.installed_apps.iter().enumerate() {
            if app.name.trim().is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "installed_apps[{}] has an empty name",
                    index
                )));
            }
            if self.installed_apps[..index]
                .iter()
                .any(|other| other.name == app.name)
            {
                return Err(config::ConfigError::Message(format!(
                    "App installed twice: {}",
                    app.name
                )));
            }
        }

        Ok(())
    }

    /// Get media root as PathBuf
    pub fn media_root_path(&self) -> PathBuf {
        PathBuf::from(&self.media_root)
    }

    /// Get apps root as PathBuf, if configured
    pub fn apps_root_path(&self) -> Option<PathBuf> {
        self.apps_root.as_ref().map(PathBuf::from)
    }

    /// Installed app identifiers in install order
    pub fn app_names(&self) -> Vec<&str> {
        self.installed_apps.iter().map(|app| app.name.as_str()).collect()
    }
}

fn env_overrides() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        media_root = "/srv/media"
        media_url = "/media/"
        apps_root = "/srv/apps"

        [[installed_apps]]
        name = "blog"

        [[installed_apps]]
        name = "gallery"
        path = "/opt/gallery"
    "#;

    #[test]
    fn parses_installed_apps_in_order() {
        let config = StorageConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.media_root_path(), PathBuf::from("/srv/media"));
        assert_eq!(config.app_names(), vec!["blog", "gallery"]);
        assert_eq!(config.installed_apps[0].path, None);
        assert_eq!(config.installed_apps[1].path.as_deref(), Some("/opt/gallery"));
        assert_eq!(config.apps_root_path(), Some(PathBuf::from("/srv/apps")));
    }

    #[test]
    fn apps_are_optional() {
        let config =
            StorageConfig::from_toml_str("media_root = \"m\"\nmedia_url = \"/m/\"").unwrap();
        assert!(config.installed_apps.is_empty());
        assert!(config.apps_root.is_none());
    }

    #[test]
    fn rejects_media_url_without_trailing_slash() {
        let err = StorageConfig::from_toml_str("media_root = \"m\"\nmedia_url = \"/m\"")
            .unwrap_err();
        assert!(err.to_string().contains("media_url"));
    }

    #[test]
    fn rejects_empty_media_root() {
        assert!(StorageConfig::new("", "/media/").validate().is_err());
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("storage.toml");
        std::fs::write(&path, "media_root = \"/from/file\"\nmedia_url = \"/media/\"").unwrap();

        // Only this test touches MEDIA_STORAGE_* in the unit test binary
        unsafe { std::env::set_var("MEDIA_STORAGE_MEDIA_ROOT", "/from/env") };
        let loaded = StorageConfig::load_from(path.to_str().unwrap());
        unsafe { std::env::remove_var("MEDIA_STORAGE_MEDIA_ROOT") };

        let config = loaded.unwrap();
        assert_eq!(config.media_root, "/from/env");
        assert_eq!(config.media_url, "/media/");
    }

    #[test]
    fn rejects_duplicate_apps() {
        let mut config = StorageConfig::new("m", "/m/");
        for _ in 0..2 {
            config.installed_apps.push(AppEntry {
                name: "blog".into(),
                path: None,
            });
        }
        assert!(config.validate().is_err());
    }
}
