//! Command line arguments

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "app-media-storage")]
#[command(about = "Locate media files in the project root or installed apps")]
pub struct CliArgs {
    /// Configuration file (extension optional)
    #[arg(long, default_value = "config")]
    pub config: String,

    /// Override the media root from the configuration
    #[arg(long)]
    pub location: Option<String>,

    /// Override the media URL from the configuration
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the app media folders in search order
    #[arg(long)]
    pub paths: bool,

    /// Asset names to resolve
    pub names: Vec<String>,
}
