//! CLI entry point for libdl.

use anyhow::{Context, Result};
use clap::Parser;
use libdl::DownloadEngine;
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{load_default_file_config, resolve_run_settings};
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let file_config = load_default_file_config()?;
    let settings = resolve_run_settings(&args, file_config.as_ref());
    debug!(?settings, "run settings resolved");

    let engine = DownloadEngine::with_config(settings.engine)
        .context("Failed to initialise download engine")?;

    let download = engine
        .create_download(&args.url, &settings.directory, settings.filename.as_deref())
        .await?;

    info!(
        path = %download.path().display(),
        size = ?download.filesize(),
        "Downloading"
    );

    let path = download.path().to_path_buf();
    let bytes = download.run().await?;

    info!(bytes, path = %path.display(), "Download complete");
    println!("{}", path.display());

    Ok(())
}
