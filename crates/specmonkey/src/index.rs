//! Per-domain index of links
//!
//! Links are grouped by the whitelisted domain they point at, then by URL
//! fragment, and written as one JSON file per domain.

use eyre::{Result, WrapErr};
use specmonkey_core::{DomainFilter, Link};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Links keyed by domain, then by fragment (empty when the URL has none)
#[derive(Debug, Default)]
pub struct Index {
    by_domain: BTreeMap<String, BTreeMap<String, Vec<Link>>>,
}

impl Index {
    /// Group `links` under their matching domain. Links `filter` rejects are
    /// dropped.
    pub fn build(links: impl IntoIterator<Item = Link>, filter: &DomainFilter) -> Self {
        let mut by_domain: BTreeMap<String, BTreeMap<String, Vec<Link>>> = BTreeMap::new();
        for link in links {
            let Some(domain) = filter.matching_domain(&link.url) else {
                debug!("Not indexing {} ({}:{})", link.url, link.file_name, link.line_number);
                continue;
            };
            let fragment = link.fragment().unwrap_or_default().to_string();
            by_domain
                .entry(domain)
                .or_default()
                .entry(fragment)
                .or_default()
                .push(link);
        }
        Self { by_domain }
    }

    /// Domains present in the index, sorted
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.by_domain.keys().map(String::as_str)
    }

    /// Links for a domain, keyed by fragment
    pub fn get(&self, domain: &str) -> Option<&BTreeMap<String, Vec<Link>>> {
        self.by_domain.get(domain)
    }

    /// Total number of indexed links
    pub fn len(&self) -> usize {
        self.by_domain
            .values()
            .flat_map(|fragments| fragments.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_domain.is_empty()
    }

    /// Write `<domain>.json` for every domain into `output_dir`, creating it
    /// if needed. Returns the files written.
    pub fn write_json(&self, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        if output_dir.exists() && !output_dir.is_dir() {
            eyre::bail!(
                "Output path {} exists and is not a directory",
                output_dir.display()
            );
        }
        std::fs::create_dir_all(output_dir)
            .wrap_err_with(|| format!("Failed to create {}", output_dir.display()))?;

        let mut written = Vec::with_capacity(self.by_domain.len());
        for (domain, fragments) in &self.by_domain {
            let path = output_dir.join(format!("{}.json", domain));
            let json = facet_json::to_string_pretty(fragments)
                .map_err(|e| eyre::eyre!("Failed to serialize index for {}: {:?}", domain, e))?;
            std::fs::write(&path, json)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
