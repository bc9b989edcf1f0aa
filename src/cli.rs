//! CLI argument definitions using clap derive macros.
//!
//! Every flag is optional: a bare invocation runs with the config file
//! values, or the built-in defaults when there is no config file.

use std::path::PathBuf;

use clap::Parser;

/// Page through the Gutendex catalog and download plain-text books.
///
/// Books already present in the output folder are skipped, so the tool can
/// be re-run against the same folder.
#[derive(Parser, Debug)]
#[command(name = "gutendex-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Folder the books are written to [default: gutenberg_books]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Stop after this many catalog items [default: 200]
    #[arg(short = 'n', long)]
    pub target: Option<usize>,

    /// Catalog listing endpoint [default: https://gutendex.com/books/]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Subject/bookshelf filter [default: philosophy]
    #[arg(long)]
    pub topic: Option<String>,

    /// Comma separated language codes [default: en]
    #[arg(long)]
    pub languages: Option<String>,

    /// Only authors alive at or before this year [default: 1950]
    #[arg(long, allow_negative_numbers = true)]
    pub author_year_end: Option<i32>,

    /// Required format prefix [default: text/plain]
    #[arg(long)]
    pub mime_type: Option<String>,
}
