//! Path validation
//!
//! Asset names must stay inside whatever directory they are joined to.

use std::path::{Component, Path};

use crate::error::StorageError;

/// Validate a relative asset name, rejecting absolute paths and `..` components
pub fn validate_name(name: &str) -> Result<&Path, StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidPath("Empty filename".into()));
    }

    if name.contains('\0') {
        return Err(StorageError::InvalidPath(name.escape_default().to_string()));
    }

    let path = Path::new(name);
    if !is_safe_path(path) {
        return Err(StorageError::PathTraversal(name.to_string()));
    }

    Ok(path)
}

/// A path is safe when it has only normal or `.` components
pub fn is_safe_path(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_names() {
        assert!(validate_name("css/site.css").is_ok());
        assert!(validate_name("./logo.png").is_ok());
        assert!(validate_name("a..b.js").is_ok());
    }

    #[test]
    fn rejects_escaping_names() {
        assert!(matches!(
            validate_name("../settings.py"),
            Err(StorageError::PathTraversal(_))
        ));
        assert!(matches!(
            validate_name("css/../../x"),
            Err(StorageError::PathTraversal(_))
        ));
        assert!(matches!(
            validate_name("/etc/passwd"),
            Err(StorageError::PathTraversal(_))
        ));
    }

    #[test]
    fn rejects_empty_and_nul_names() {
        assert!(matches!(validate_name(""), Err(StorageError::InvalidPath(_))));
        assert!(matches!(
            validate_name("a\0b"),
            Err(StorageError::InvalidPath(_))
        ));
    }
}
