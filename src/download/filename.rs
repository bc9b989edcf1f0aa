//! Title sanitization and output path derivation.

use std::path::{Path, PathBuf};

/// Maximum length of a sanitized title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Extension given to every downloaded book.
const BOOK_EXTENSION: &str = "txt";

/// Turns a book title into a filesystem-safe file stem.
///
/// Keeps alphanumeric characters, spaces and underscores, drops everything
/// else, truncates to [`MAX_TITLE_CHARS`] characters and trims trailing
/// whitespace. Different titles can map to the same stem.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let mut kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_'))
        .take(MAX_TITLE_CHARS)
        .collect();
    // Truncation may expose a space that sat inside the title.
    kept.truncate(kept.trim_end().len());
    kept
}

/// Returns `{folder}/{sanitized title}.txt`.
#[must_use]
pub fn book_path(folder: &Path, title: &str) -> PathBuf {
    folder.join(format!("{}.{BOOK_EXTENSION}", sanitize_title(title)))
}
