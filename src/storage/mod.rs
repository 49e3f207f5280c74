//! Media file storage
//!
//! Plain filesystem storage plus the app-aware storage layered over it.

pub mod app_media;
pub mod filesystem;
pub mod results;
pub mod validation;

pub use app_media::{APP_MEDIA_DIR, AppMediaStorage};
pub use filesystem::FileSystemStorage;
pub use results::{AppMediaPath, MediaSource, ResolvedMedia};
