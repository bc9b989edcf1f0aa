//! User-Agent string shared by catalog and download requests.

/// Short description appended to the crate name and version.
const UA_PURPOSE: &str = "book-catalog-fetcher";

/// Default User-Agent for every request (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    format!("{name}/{version} ({UA_PURPOSE})")
}
