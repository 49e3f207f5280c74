pub mod apps;
pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod utils;

pub use apps::{AppRegistry, SharedAppRegistry};
pub use config::StorageConfig;
pub use error::{AppError, StorageError};
pub use storage::{AppMediaStorage, FileSystemStorage, MediaSource, ResolvedMedia};
