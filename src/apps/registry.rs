//! App registry
//!
//! Keeps installed apps in registration order. An identifier resolves to an
//! explicit install directory when one was given, otherwise its dotted
//! segments are joined under the apps root (`blog.contrib` becomes
//! `<apps_root>/blog/contrib`).

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::StorageConfig;
use crate::error::StorageError;

/// Registry shared between the host and every storage that reads it
pub type SharedAppRegistry = Arc<RwLock<AppRegistry>>;

/// An installed app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    pub name: String,
    pub path: Option<PathBuf>,
}

/// Ordered registry of installed apps
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    apps: Vec<InstalledApp>,
    apps_root: Option<PathBuf>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry resolving path-less identifiers under `apps_root`
    pub fn with_apps_root(apps_root: impl Into<PathBuf>) -> Self {
        Self {
            apps: Vec::new(),
            apps_root: Some(apps_root.into()),
        }
    }

    /// Seed a registry from the `installed_apps` and `apps_root` settings
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut registry = Self {
            apps: Vec::with_capacity(config.installed_apps.len()),
            apps_root: config.apps_root_path(),
        };

        for entry in &config.installed_apps {
            let path = entry.path.as_ref().map(PathBuf::from);
            registry.push(InstalledApp {
                name: entry.name.clone(),
                path,
            })?;
        }

        Ok(registry)
    }

    /// Wrap the registry for sharing with storages
    pub fn into_shared(self) -> SharedAppRegistry {
        Arc::new(RwLock::new(self))
    }

    /// Install an app with an explicit install directory
    pub fn install(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<(), StorageError> {
        self.push(InstalledApp {
            name: name.into(),
            path: Some(path.into()),
        })
    }

    /// Install an app resolved under the apps root
    pub fn install_under_root(&mut self, name: impl Into<String>) -> Result<(), StorageError> {
        self.push(InstalledApp {
            name: name.into(),
            path: None,
        })
    }

    /// Remove an app, returning whether it was installed
    pub fn uninstall(&mut self, name: &str) -> bool {
        let before = self.apps.len();
        self.apps.retain(|app| app.name != name);
        let removed = self.apps.len() != before;
        if removed {
            info!("Uninstalled app {}", name);
        }
        removed
    }

    fn push(&mut self, app: InstalledApp) -> Result<(), StorageError> {
        validate_identifier(&app.name)?;
        if self.contains(&app.name) {
            return Err(StorageError::DuplicateApp(app.name));
        }
        info!("Installed app {} ({} apps)", app.name, self.apps.len() + 1);
        self.apps.push(app);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.apps.iter().any(|app| app.name == name)
    }

    pub fn apps_root(&self) -> Option<&Path> {
        self.apps_root.as_deref()
    }

    /// Installed apps in install order
    pub fn apps(&self) -> &[InstalledApp] {
        &self.apps
    }

    /// Installed app identifiers in install order
    pub fn names(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.apps.iter().map(|app| app.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Resolve an installed app identifier to its install directory.
    ///
    /// Fails with [`StorageError::AppNotFound`] when the app is not
    /// installed, has neither an explicit path nor an apps root to resolve
    /// under, or the resolved directory does not exist.
    pub fn install_dir(&self, name: &str) -> Result<PathBuf, StorageError> {
        let app = self
            .apps
            .iter()
            .find(|app| app.name == name)
            .ok_or_else(|| StorageError::AppNotFound(name.to_string()))?;

        let dir = match (&app.path, &self.apps_root) {
            (Some(path), _) => path.clone(),
            (None, Some(root)) => name
                .split('.')
                .fold(root.clone(), |dir, segment| dir.join(segment)),
            (None, None) => return Err(StorageError::AppNotFound(name.to_string())),
        };

        if !dir.is_dir() {
            debug!("App {} resolved to missing directory {}", name, dir.display());
            return Err(StorageError::AppNotFound(name.to_string()));
        }

        Ok(dir)
    }
}

/// Identifiers are dot-separated, non-empty segments without path separators
fn validate_identifier(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && name
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.contains(['/', '\\']));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(format!("app identifier {:?}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn keeps_install_order() {
        let mut registry = AppRegistry::new();
        registry.install("blog", "/a").unwrap();
        registry.install("gallery", "/b").unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["blog", "gallery"]);
        assert_eq!(registry.names().rev().next(), Some("gallery"));
    }

    #[test]
    fn rejects_duplicates_and_bad_identifiers() {
        let mut registry = AppRegistry::new();
        registry.install_under_root("blog").unwrap();
        assert!(matches!(
            registry.install_under_root("blog"),
            Err(StorageError::DuplicateApp(_))
        ));
        assert!(registry.install_under_root("").is_err());
        assert!(registry.install_under_root("blog..admin").is_err());
        assert!(registry.install_under_root("../etc").is_err());
    }

    #[test]
    fn explicit_path_wins_over_apps_root() {
        let root = TempDir::new().unwrap();
        let explicit = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("blog")).unwrap();

        let mut registry = AppRegistry::with_apps_root(root.path());
        registry.install("blog", explicit.path()).unwrap();

        assert_eq!(registry.install_dir("blog").unwrap(), explicit.path());
    }

    #[test]
    fn dotted_identifiers_resolve_under_apps_root() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("shop").join("checkout")).unwrap();

        let mut registry = AppRegistry::with_apps_root(root.path());
        registry.install_under_root("shop.checkout").unwrap();

        assert_eq!(
            registry.install_dir("shop.checkout").unwrap(),
            root.path().join("shop").join("checkout")
        );
    }

    #[test]
    fn unresolvable_apps_fail() {
        let root = TempDir::new().unwrap();
        let mut registry = AppRegistry::with_apps_root(root.path());
        registry.install_under_root("ghost").unwrap();
        assert!(matches!(
            registry.install_dir("ghost"),
            Err(StorageError::AppNotFound(name)) if name == "ghost"
        ));
        assert!(registry.install_dir("never_installed").is_err());

        let mut rootless = AppRegistry::new();
        rootless.install_under_root("blog").unwrap();
        assert!(rootless.install_dir("blog").is_err());
    }

    #[test]
    fn uninstall_removes_app() {
        let mut registry = AppRegistry::new();
        registry.install("blog", "/a").unwrap();
        assert!(registry.uninstall("blog"));
        assert!(!registry.uninstall("blog"));
        assert!(registry.is_empty());
    }

    #[test]
    fn seeds_from_config() {
        let config = StorageConfig::from_toml_str(
            r#"
            media_root = "m"
            media_url = "/m/"
            apps_root = "/srv/apps"
            [[installed_apps]]
            name = "blog"
            [[installed_apps]]
            name = "gallery"
            path = "/opt/gallery"
            "#,
        )
        .unwrap();

        let registry = AppRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.apps_root(), Some(Path::new("/srv/apps")));
        assert_eq!(registry.apps()[1].path, Some(PathBuf::from("/opt/gallery")));
    }
}
