//! Installed application registry
//!
//! Tracks installed apps in install order and resolves app identifiers to
//! their install directories.

pub mod registry;

pub use registry::{AppRegistry, InstalledApp, SharedAppRegistry};
