//! Media storage locator - Entry Point
//!
//! Resolves asset names against the project media root and the media
//! folders of installed apps, and reports where each one is served from.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

use app_media_storage::cli::CliArgs;
use app_media_storage::error::handlers::{EXIT_NOT_FOUND, error_to_exit_code, handle_error};
use app_media_storage::utils::logging::setup_logging;
use app_media_storage::{AppError, AppMediaStorage, AppRegistry, MediaSource, StorageConfig};

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = CliArgs::parse();
    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            handle_error(&e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

async fn run(args: CliArgs) -> Result<u8, AppError> {
    let config = StorageConfig::load_from(&args.config)?;
    let registry = AppRegistry::from_config(&config)?.into_shared();
    let storage = AppMediaStorage::new(
        args.location.map(PathBuf::from),
        args.base_url,
        &config,
        registry,
    );

    info!(
        "Serving {} at {}",
        storage.location().display(),
        storage.base_url()
    );

    if args.paths {
        for candidate in storage.get_media_paths()? {
            println!("{}\t{}", candidate.app, candidate.path.display());
        }
    }

    let mut missing = 0usize;
    for name in &args.names {
        match storage.resolve(name)? {
            Some(resolved) => {
                let size = match &resolved.source {
                    MediaSource::Root => storage.base().size(name)?,
                    MediaSource::App(_) => tokio::fs::metadata(&resolved.path).await?.len(),
                };
                println!(
                    "{}\t{}\t{}\t{} bytes\t{}",
                    name,
                    resolved.path.display(),
                    resolved.source,
                    size,
                    storage.url(name)?
                );
            }
            None => {
                missing += 1;
                println!("{}\tnot found", name);
            }
        }
    }

    if missing > 0 {
        info!("{} of {} names not found", missing, args.names.len());
        Ok(EXIT_NOT_FOUND)
    } else {
        Ok(0)
    }
}
