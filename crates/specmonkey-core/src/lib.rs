//! specmonkey-core - Find URLs referenced from source code comments
//!
//! This crate provides the building blocks for:
//! - Looking up a file's comment syntax by extension ([`lookup`], [`Grammar`])
//! - Splitting file content into comment spans ([`CommentScanner`])
//! - Finding `http://` / `https://` URLs in comment text ([`find_urls`])
//! - Running all of the above over many files in parallel ([`extract`], [`Sources`])
//!
//! # Features
//!
//! - `walk` - Enable [`WalkSources`] for gitignore-aware directory walking (brings in `ignore`, `globset`)
//! - `parallel` - Enable parallel extraction (brings in `rayon`)
//!
//! # Extracting links
//!
//! Only URLs inside comments count. A URL in a string literal or in markup
//! outside `<!-- -->` is code as far as the scanner is concerned.
//!
//! ```
//! use specmonkey_core::{Links, MemorySources};
//!
//! let links = Links::extract(
//!     MemorySources::new()
//!         .add("main.cpp", "int x; // https://example.com/cpp")
//!         .add("index.html", "<a href=\"https://not.a.comment\">\n<!-- https://example.com/html -->"),
//! )
//! .unwrap();
//!
//! assert_eq!(links.len(), 2);
//! assert_eq!(links.links[1].url, "https://example.com/html");
//! assert_eq!(links.links[1].line_number, 2);
//! ```
//!
//! Files that cannot be read are skipped rather than reported:
//!
//! ```
//! let links = specmonkey_core::extract(["does/not/exist.rs"]);
//! assert!(links.is_empty());
//! ```

mod filter;
mod grammar;
mod links;
mod matcher;
mod scanner;
mod sources;

pub use filter::DomainFilter;
pub use grammar::{GRAMMARS, Grammar, SUPPORTED_EXTENSIONS, is_supported_extension, lookup};
pub use links::{Link, Links};
pub use matcher::{UrlMatch, UrlMatches, find_urls};
pub use scanner::{CommentScanner, CommentSpan, scan};
pub use sources::{MemorySources, PathSources, Sources};

#[cfg(feature = "walk")]
pub use sources::WalkSources;

/// Extract every URL found in comments of the given files.
///
/// Missing, unreadable and non-UTF-8 files contribute nothing. Each path is
/// processed on its own, so listing a file twice yields its links twice.
pub fn extract(file_paths: impl IntoIterator<Item = impl Into<String>>) -> Vec<Link> {
    PathSources::new(file_paths).collect_links().into_vec()
}
