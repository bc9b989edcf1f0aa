//! Explicit run configuration for the pagination driver.

use std::path::PathBuf;

use crate::catalog::CatalogQuery;

/// Listing endpoint of the public Gutendex catalog.
pub const DEFAULT_BASE_URL: &str = "https://gutendex.com/books/";

/// Number of catalog items to process before stopping.
pub const DEFAULT_TARGET_COUNT: usize = 200;

/// Folder the plain-text books are written to.
pub const DEFAULT_DOWNLOAD_FOLDER: &str = "gutenberg_books";

/// Everything a run needs, passed to [`PaginationDriver::run`](crate::PaginationDriver::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// First listing URL; later pages come from the server's `next` links.
    pub base_url: String,
    /// Filters sent with every listing request.
    pub query: CatalogQuery,
    /// Stop once this many catalog items have been processed.
    pub target_count: usize,
    /// Output directory for downloaded books.
    pub download_folder: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query: CatalogQuery::default(),
            target_count: DEFAULT_TARGET_COUNT,
            download_folder: PathBuf::from(DEFAULT_DOWNLOAD_FOLDER),
        }
    }
}
