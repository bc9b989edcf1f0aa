//! Book download manager.
//!
//! This module turns catalog items into plain-text files on disk.
//!
//! # Features
//!
//! - Picks the `text/plain; charset=us-ascii` representation of each book
//! - Derives the filename from the sanitized title (no disambiguation)
//! - Skips books whose file already exists (no re-fetch, no comparison)
//! - Streams the body to disk and removes partial files on failure
//! - Per-item failures are reported and never abort the batch
//!
//! # Example
//!
//! ```no_run
//! use gutendex_core::{DownloadManager, HttpClient, HttpTimeouts, build_http_client};
//! use std::path::Path;
//!
//! # async fn example(items: Vec<gutendex_core::CatalogItem>) -> Result<(), Box<dyn std::error::Error>> {
//! let manager = DownloadManager::new(HttpClient::new(build_http_client(HttpTimeouts::default())?));
//! let report = manager.persist(&items, Path::new("gutenberg_books")).await;
//! println!("wrote {} files", report.downloaded());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod filename;
mod manager;

pub use client::HttpClient;
pub use error::DownloadError;
pub use filename::{MAX_TITLE_CHARS, book_path, sanitize_title};
pub use manager::{DownloadManager, ItemOutcome, PLAIN_TEXT_FORMAT, PersistReport};
