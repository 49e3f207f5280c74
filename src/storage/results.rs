//! Storage result types
//!
//! Defines result structures returned by lookups.

use std::fmt;
use std::path::PathBuf;

/// Where a resolved name was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Root,
    /// Media folder of the named installed app
    App(String),
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSource::Root => write!(f, "media root"),
            MediaSource::App(app) => write!(f, "app {}", app),
        }
    }
}

/// Result of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub name: String,
    pub path: PathBuf,
    pub source: MediaSource,
}

/// One entry of the candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMediaPath {
    pub app: String,
    pub path: PathBuf,
}
