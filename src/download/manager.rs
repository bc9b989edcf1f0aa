//! Persists the books of one listing page into the download folder.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::error::DownloadError;
use super::filename::book_path;
use super::HttpClient;
use crate::catalog::CatalogItem;

/// Content type of the only representation that gets downloaded.
pub const PLAIN_TEXT_FORMAT: &str = "text/plain; charset=us-ascii";

/// What happened to one catalog item.
#[derive(Debug)]
pub enum ItemOutcome {
    /// The representation was fetched and written.
    Downloaded {
        /// File that was written.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// A file with the derived name already existed; nothing was fetched.
    AlreadyPresent {
        /// The existing file.
        path: PathBuf,
    },
    /// The item offers no [`PLAIN_TEXT_FORMAT`] representation, or an empty URL for it.
    NoSuitableFormat,
    /// Fetching or writing failed; the batch continued.
    Failed {
        /// Why the item was skipped.
        error: DownloadError,
    },
}

/// Outcomes of one [`DownloadManager::persist`] call, in input order.
#[derive(Debug, Default)]
pub struct PersistReport {
    /// One outcome per input item.
    pub outcomes: Vec<ItemOutcome>,
}

impl PersistReport {
    /// Number of files written.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Downloaded { .. }))
    }

    /// Number of items skipped because their file existed.
    #[must_use]
    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::AlreadyPresent { .. }))
    }

    /// Number of items without a plain-text representation.
    #[must_use]
    pub fn missing_format(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::NoSuitableFormat))
    }

    /// Number of items whose fetch or write failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Writes plain-text copies of catalog items, skipping files already on disk.
///
/// Items are processed one after another; a failing item never aborts the
/// rest of the batch.
#[derive(Debug, Clone)]
pub struct DownloadManager {
    client: HttpClient,
}

impl DownloadManager {
    /// Creates a manager that downloads through `client`.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Downloads every item of `items` into `folder`, creating it if needed.
    #[instrument(skip(self, items), fields(items = items.len(), folder = %folder.display()))]
    pub async fn persist(&self, items: &[CatalogItem], folder: &Path) -> PersistReport {
        if let Err(error) = tokio::fs::create_dir_all(folder).await {
            warn!(error = %error, "Could not create download folder");
            let outcomes = items
                .iter()
                .map(|_| ItemOutcome::Failed {
                    error: DownloadError::io(
                        folder,
                        std::io::Error::new(error.kind(), error.to_string()),
                    ),
                })
                .collect();
            return PersistReport { outcomes };
        }

        let mut report = PersistReport {
            outcomes: Vec::with_capacity(items.len()),
        };
        for item in items {
            report.outcomes.push(self.persist_item(item, folder).await);
        }
        report
    }

    async fn persist_item(&self, item: &CatalogItem, folder: &Path) -> ItemOutcome {
        let title = item.title.as_str();

        let Some(download_url) = item
            .formats
            .get(PLAIN_TEXT_FORMAT)
            .filter(|url| !url.is_empty())
        else {
            warn!(title, id = ?item.id, "No text/plain format available");
            return ItemOutcome::NoSuitableFormat;
        };

        let path = book_path(folder, title);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            info!(title, path = %path.display(), "Skipping - already downloaded");
            return ItemOutcome::AlreadyPresent { path };
        }

        match self.client.download_to_path(download_url, &path).await {
            Ok(bytes) => {
                info!(title, path = %path.display(), bytes, "Downloaded");
                ItemOutcome::Downloaded { path, bytes }
            }
            Err(error) if error.is_io() => {
                warn!(title, error = %error, "Error downloading");
                ItemOutcome::Failed { error }
            }
            Err(error) => {
                warn!(title, error = %error, "Failed to download");
                ItemOutcome::Failed { error }
            }
        }
    }
}
