//! specmonkey library - Index URLs referenced from source code comments
//!
//! This library exposes the commands behind the `specmonkey` binary for
//! testing and embedding purposes.

pub mod config;
pub mod index;
pub mod output;

use config::Config;
use eyre::Result;
use index::Index;
use specmonkey_core::{DomainFilter, Link, WalkSources};
use std::path::Path;
use tracing::info;

/// Extensions `scan` looks at when none are given
pub const DEFAULT_EXTENSIONS: &[&str] = &["cpp", "h", "rs", "js", "html"];

/// Outcome of scanning a directory
#[derive(Debug)]
pub struct ScanResult {
    /// Number of files handed to the extractor
    pub files: usize,
    pub links: Vec<Link>,
}

/// Walk `root` for files with the given extensions and extract their links.
///
/// An empty `extensions` list means every extension with a comment grammar.
pub fn scan_directory(root: &Path, extensions: &[String], exclude: &[String]) -> Result<ScanResult> {
    let files = WalkSources::new(root)
        .extensions(extensions.iter().cloned())
        .exclude(exclude.iter().cloned())
        .files()?;

    info!("Found {} files to scan under {}", files.len(), root.display());
    let file_count = files.len();
    let links = specmonkey_core::extract(files);

    Ok(ScanResult {
        files: file_count,
        links,
    })
}

/// Scan the source repository described by `config` and index the links
/// that point at its domains.
pub fn build_index(config: &Config, source_repository: &Path) -> Result<Index> {
    let scan = scan_directory(source_repository, &config.extensions, &[])?;
    let filter = DomainFilter::new(&config.domains);
    let index = Index::build(scan.links, &filter);

    info!(
        "Indexed {} links across {} domains",
        index.len(),
        index.domains().count()
    );
    Ok(index)
}
