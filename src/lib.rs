//! Gutendex Downloader Core Library
//!
//! This library pages through the Gutendex book catalog and saves a
//! plain-text copy of every matching book into a local folder, skipping
//! books whose file is already present.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Listing client for the paginated catalog endpoint
//! - [`download`] - Per-book download manager and filename sanitization
//! - [`pagination`] - Driver that follows `next` links until a target count
//! - [`config`] - Explicit run configuration and defaults
//! - [`http_client`] - Shared HTTP client construction policy

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod download;
pub mod http_client;
pub mod pagination;
mod user_agent;

// Re-export commonly used types
pub use catalog::{CatalogClient, CatalogError, CatalogItem, CatalogQuery, PageResult};
pub use config::{DEFAULT_BASE_URL, DEFAULT_DOWNLOAD_FOLDER, DEFAULT_TARGET_COUNT, RunConfig};
pub use download::{
    DownloadError, DownloadManager, HttpClient, ItemOutcome, PLAIN_TEXT_FORMAT, PersistReport,
    sanitize_title,
};
pub use http_client::{HttpTimeouts, build_http_client};
pub use pagination::{PaginationDriver, RunSummary, StopReason};
