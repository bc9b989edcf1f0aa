//! Listing filters and their merge into server-provided page links.

use std::collections::HashSet;

use url::Url;

use super::CatalogError;

/// Filters sent to the listing endpoint.
///
/// Each field maps to one query parameter; `None` fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// `topic` - substring matched against subjects and bookshelves.
    pub topic: Option<String>,
    /// `languages` - comma separated two-letter language codes.
    pub languages: Option<String>,
    /// `author_year_end` - only authors alive at or before this year.
    pub author_year_end: Option<i32>,
    /// `mime_type` - prefix of a format the book must offer.
    pub mime_type: Option<String>,
}

impl Default for CatalogQuery {
    /// Philosophy books in English by authors alive before 1950, with a plain-text format.
    fn default() -> Self {
        Self {
            topic: Some("philosophy".to_string()),
            languages: Some("en".to_string()),
            author_year_end: Some(1950),
            mime_type: Some("text/plain".to_string()),
        }
    }
}

impl CatalogQuery {
    /// Returns the set parameters as `(name, value)` pairs in wire order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(topic) = &self.topic {
            pairs.push(("topic", topic.clone()));
        }
        if let Some(languages) = &self.languages {
            pairs.push(("languages", languages.clone()));
        }
        if let Some(year) = self.author_year_end {
            pairs.push(("author_year_end", year.to_string()));
        }
        if let Some(mime_type) = &self.mime_type {
            pairs.push(("mime_type", mime_type.clone()));
        }
        pairs
    }
}

/// Appends the query parameters to `url`, skipping any key the URL already carries.
///
/// `next` links returned by the catalog already encode the filters of the
/// first request, so their embedded values win over `query`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidUrl`] when `url` cannot be parsed.
pub fn merge_query(url: &str, query: &CatalogQuery) -> Result<Url, CatalogError> {
    let mut parsed = Url::parse(url).map_err(|_| CatalogError::invalid_url(url))?;
    let present: HashSet<String> = parsed
        .query_pairs()
        .map(|(key, _)| key.into_owned())
        .collect();

    let missing: Vec<(&'static str, String)> = query
        .pairs()
        .into_iter()
        .filter(|(key, _)| !present.contains(*key))
        .collect();

    if !missing.is_empty() {
        let mut serializer = parsed.query_pairs_mut();
        for (key, value) in &missing {
            serializer.append_pair(key, value);
        }
    }

    Ok(parsed)
}
