//! Client for the paginated catalog listing endpoint.
//!
//! One call to [`CatalogClient::fetch`] issues exactly one GET request and
//! yields one [`PageResult`], or `None` when the page could not be obtained.
//!
//! # Example
//!
//! ```no_run
//! use gutendex_core::{CatalogClient, CatalogQuery, HttpTimeouts, build_http_client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new(build_http_client(HttpTimeouts::default())?);
//! if let Some(page) = client
//!     .fetch("https://gutendex.com/books/", &CatalogQuery::default())
//!     .await
//! {
//!     println!("{} books on this page", page.results.len());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod query;

use std::collections::HashMap;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

pub use error::CatalogError;
pub use query::{CatalogQuery, merge_query};

/// One book entry of a listing page.
///
/// Only the fields the downloader acts on are kept; everything else in the
/// catalog document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogItem {
    /// Catalog identifier, used for log context only.
    #[serde(default)]
    pub id: Option<u64>,
    /// Human-readable title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Content-type to URL map of the available representations.
    ///
    /// Entries whose URL is `null` are dropped while decoding, so one broken
    /// entry never rejects the page it sits on.
    #[serde(default, deserialize_with = "formats_without_nulls")]
    pub formats: HashMap<String, String>,
}

/// One page of the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageResult {
    /// Total number of matches across all pages, when reported.
    #[serde(default)]
    pub count: Option<u64>,
    /// Books on this page, in listing order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CatalogItem>,
    /// Link to the following page; `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn formats_without_nulls<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<HashMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(content_type, url)| url.map(|url| (content_type, url)))
        .collect())
}

/// HTTP client for the catalog listing endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Wraps a shared HTTP client (see [`build_http_client`](crate::build_http_client)).
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one listing page, reporting any failure and returning `None`.
    ///
    /// A non-200 status, a transport error or an undecodable body all end up
    /// as `None`; nothing is retried.
    pub async fn fetch(&self, url: &str, query: &CatalogQuery) -> Option<PageResult> {
        match self.fetch_page(url, query).await {
            Ok(page) => Some(page),
            Err(error) => {
                match error.status() {
                    Some(status) => warn!(status, "Failed to fetch books"),
                    None => warn!(error = %error, "Failed to fetch books"),
                }
                None
            }
        }
    }

    /// Fetches and decodes one listing page.
    ///
    /// Parameters of `query` are appended to `url` unless the URL already
    /// carries the same key (see [`merge_query`]).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the URL is invalid, the request fails, the
    /// status is not 200, or the body is not a listing document.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn fetch_page(
        &self,
        url: &str,
        query: &CatalogQuery,
    ) -> Result<PageResult, CatalogError> {
        let request_url = merge_query(url, query)?;
        debug!(request_url = %request_url, "requesting catalog page");

        let response = self
            .client
            .get(request_url.as_str())
            .send()
            .await
            .map_err(|e| CatalogError::from_transport(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::from_transport(url, e))?;
        let page: PageResult =
            serde_json::from_slice(&body).map_err(|e| CatalogError::decode(url, e))?;

        debug!(
            results = page.results.len(),
            count = ?page.count,
            has_next = page.next.is_some(),
            "decoded catalog page"
        );
        Ok(page)
    }
}
