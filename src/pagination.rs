//! Pagination driver: follows `next` links until a target count is reached.
//!
//! The driver owns two pieces of state, the URL of the next page and the
//! number of catalog items processed so far. It keeps fetching while a next
//! URL exists and the count is below the target, handing every non-empty page
//! to the [`DownloadManager`].
//!
//! The processed count grows by the full page size, including items that
//! produced no file (no plain-text format, already present, failed). The
//! [`RunSummary`] reports the actual outcomes next to it.

use tracing::{debug, info, instrument};

use crate::catalog::CatalogClient;
use crate::config::RunConfig;
use crate::download::{DownloadManager, PersistReport};

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopReason {
    /// The processed count reached the target.
    TargetReached,
    /// The last fetched page had no `next` link.
    #[default]
    LastPage,
    /// A page came back with no results.
    EmptyPage,
    /// A listing request failed.
    FetchFailed,
}

/// Totals of one driver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Catalog items processed (sum of page sizes).
    pub downloaded_count: usize,
    /// Listing pages successfully fetched.
    pub pages_fetched: usize,
    /// Files written.
    pub files_written: usize,
    /// Items skipped because their file existed.
    pub skipped_existing: usize,
    /// Items without a plain-text representation.
    pub missing_format: usize,
    /// Items whose download or write failed.
    pub failed: usize,
    /// Why the loop ended.
    pub stop_reason: StopReason,
}

impl RunSummary {
    fn record(&mut self, report: &PersistReport) {
        self.files_written += report.downloaded();
        self.skipped_existing += report.already_present();
        self.missing_format += report.missing_format();
        self.failed += report.failed();
    }
}

/// Drives catalog fetches and downloads for one run.
#[derive(Debug, Clone)]
pub struct PaginationDriver {
    catalog: CatalogClient,
    manager: DownloadManager,
}

impl PaginationDriver {
    /// Creates a driver from its two collaborators.
    #[must_use]
    pub fn new(catalog: CatalogClient, manager: DownloadManager) -> Self {
        Self { catalog, manager }
    }

    /// Runs the fetch/download loop to completion.
    ///
    /// Never fails: listing failures end the loop, item failures are counted.
    #[instrument(skip(self, config), fields(base_url = %config.base_url, target = config.target_count))]
    pub async fn run(&self, config: &RunConfig) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut next_url = Some(config.base_url.clone());

        summary.stop_reason = loop {
            let Some(url) = next_url.take() else {
                break StopReason::LastPage;
            };
            if summary.downloaded_count >= config.target_count {
                break StopReason::TargetReached;
            }

            debug!(url = %url, processed = summary.downloaded_count, "fetching page");
            let Some(page) = self.catalog.fetch(&url, &config.query).await else {
                info!("No more books found");
                break StopReason::FetchFailed;
            };
            summary.pages_fetched += 1;

            if page.results.is_empty() {
                info!("No more books found");
                break StopReason::EmptyPage;
            }

            info!(books = page.results.len(), "Found books");
            let report = self
                .manager
                .persist(&page.results, &config.download_folder)
                .await;
            summary.record(&report);
            summary.downloaded_count += page.results.len();

            next_url = page.next;
            if let Some(next) = &next_url {
                info!(next = %next, "Fetching more books");
            }
        };

        debug!(stop_reason = ?summary.stop_reason, "pagination finished");
        summary
    }
}
