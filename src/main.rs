//! CLI entry point for the Gutendex downloader.

use anyhow::{Context, Result};
use clap::Parser;
use gutendex_core::{
    CatalogClient, DownloadManager, HttpClient, HttpTimeouts, PaginationDriver, RunConfig,
    build_http_client,
};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{FileConfig, load_default_file_config};
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let loaded = load_default_file_config()?;
    let file_config = loaded.config.unwrap_or_default();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .verbosity
                .map_or("info", app_config::VerbositySetting::filter_directive),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, config_path = ?loaded.path, "configuration loaded");

    let run_config = resolve_run_config(&args, &file_config);
    let timeouts = resolve_timeouts(&file_config);

    let http = build_http_client(timeouts).context("Failed to build HTTP client")?;
    let driver = PaginationDriver::new(
        CatalogClient::new(http.clone()),
        DownloadManager::new(HttpClient::new(http)),
    );

    info!(
        base_url = %run_config.base_url,
        target = run_config.target_count,
        folder = %run_config.download_folder.display(),
        "Gutendex downloader starting"
    );

    let summary = driver.run(&run_config).await;

    info!(
        downloaded = summary.downloaded_count,
        files_written = summary.files_written,
        skipped_existing = summary.skipped_existing,
        missing_format = summary.missing_format,
        failed = summary.failed,
        pages = summary.pages_fetched,
        stop_reason = ?summary.stop_reason,
        "Downloaded {} books",
        summary.downloaded_count
    );

    Ok(())
}

/// Merges CLI flags over file config over built-in defaults.
fn resolve_run_config(args: &Args, file: &FileConfig) -> RunConfig {
    let defaults = RunConfig::default();
    let mut query = defaults.query;

    if let Some(topic) = args.topic.clone().or_else(|| file.topic.clone()) {
        query.topic = Some(topic);
    }
    if let Some(languages) = args.languages.clone().or_else(|| file.languages.clone()) {
        query.languages = Some(languages);
    }
    if let Some(year) = args.author_year_end.or(file.author_year_end) {
        query.author_year_end = Some(year);
    }
    if let Some(mime_type) = args.mime_type.clone().or_else(|| file.mime_type.clone()) {
        query.mime_type = Some(mime_type);
    }

    RunConfig {
        base_url: args
            .base_url
            .clone()
            .or_else(|| file.base_url.clone())
            .unwrap_or(defaults.base_url),
        query,
        target_count: args
            .target
            .or(file.target_count)
            .unwrap_or(defaults.target_count),
        download_folder: args
            .output_dir
            .clone()
            .or_else(|| file.output_dir.clone())
            .unwrap_or(defaults.download_folder),
    }
}

fn resolve_timeouts(file: &FileConfig) -> HttpTimeouts {
    let defaults = HttpTimeouts::default();
    HttpTimeouts {
        connect_secs: file.connect_timeout_secs.unwrap_or(defaults.connect_secs),
        read_secs: file.read_timeout_secs.unwrap_or(defaults.read_secs),
    }
}
