//! Source providers for link extraction

use crate::links::{Link, Links, extract_from_content};
use eyre::Result;
#[cfg(feature = "walk")]
use std::path::PathBuf;
use tracing::debug;

/// Trait for providing source files to extract links from
pub trait Sources {
    /// Extract links from all sources
    fn extract(self) -> Result<Links>;
}

/// Read and scan one file. Anything that keeps us from getting UTF-8 text
/// out of the path means the file contributes nothing.
fn extract_from_path(path: &str) -> Vec<Link> {
    // FIFOs and device files would block or never end
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(meta) => {
            debug!("Skipping {}: not a regular file ({:?})", path, meta.file_type());
            return Vec::new();
        }
        Err(e) => {
            debug!("Skipping {}: {}", path, e);
            return Vec::new();
        }
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Skipping {}: {}", path, e);
            return Vec::new();
        }
    };

    let mut links = Vec::new();
    extract_from_content(path, &content, &mut links);
    debug!("Found {} links in {}", links.len(), path);
    links
}

/// Sources from an explicit list of file paths
///
/// Paths are kept as the caller wrote them; every link carries its path
/// verbatim as `file_name`.
pub struct PathSources(Vec<String>);

impl PathSources {
    /// Create from an iterator of paths
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }

    /// Extract links. Unreadable files are skipped, so this cannot fail.
    pub fn collect_links(self) -> Links {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Each worker owns its file's result; the only merge is the collect.
            let per_file: Vec<Vec<Link>> = self
                .0
                .par_iter()
                .map(|path| extract_from_path(path))
                .collect();

            per_file.into_iter().flatten().collect::<Vec<_>>().into()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.0
                .iter()
                .flat_map(|path| extract_from_path(path))
                .collect::<Vec<_>>()
                .into()
        }
    }
}

impl Sources for PathSources {
    fn extract(self) -> Result<Links> {
        Ok(self.collect_links())
    }
}

/// In-memory sources (useful for testing, embedding, etc.)
pub struct MemorySources(Vec<(String, String)>);

impl MemorySources {
    /// Create empty memory sources
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a file with content
    pub fn add(mut self, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        self.0.push((file_name.into(), content.into()));
        self
    }
}

impl Default for MemorySources {
    fn default() -> Self {
        Self::new()
    }
}

impl Sources for MemorySources {
    fn extract(self) -> Result<Links> {
        let mut links = Links::new();
        for (file_name, content) in self.0 {
            links.extend(Links::extract_from_content(&file_name, &content));
        }
        Ok(links)
    }
}

/// Gitignore-aware directory walker
///
/// Keeps regular files whose extension is in the allow-list (compared
/// ignoring ASCII case). With no allow-list, every extension the grammar
/// table knows is scanned.
#[cfg(feature = "walk")]
pub struct WalkSources {
    root: PathBuf,
    extensions: Vec<String>,
    exclude: Vec<String>,
}

#[cfg(feature = "walk")]
impl WalkSources {
    /// Create a walker for the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Restrict the walk to these extensions (e.g., `["cpp", "h"]`)
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions.extend(
            extensions
                .into_iter()
                .map(Into::into)
                .map(|e| e.trim_start_matches('.').to_string()),
        );
        self
    }

    /// Add exclude patterns (e.g., `["target/**"]`), relative to the root
    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Collect the paths the walk would scan, in walk order
    pub fn files(&self) -> Result<Vec<String>> {
        use eyre::WrapErr;
        use globset::{Glob, GlobSetBuilder};
        use ignore::WalkBuilder;

        if !self.root.is_dir() {
            eyre::bail!("Source directory not found: {}", self.root.display());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(
                Glob::new(pattern)
                    .wrap_err_with(|| format!("Invalid exclude pattern: {}", pattern))?,
            );
        }
        let exclude = builder.build().wrap_err("Failed to build exclude patterns")?;

        let walker = WalkBuilder::new(&self.root)
            .follow_links(true)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Skipping walk entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.wants_extension(path) {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if exclude.is_match(relative) {
                continue;
            }

            match path.to_str() {
                Some(p) => files.push(p.to_string()),
                None => debug!("Skipping non-UTF-8 path {}", path.display()),
            }
        }

        Ok(files)
    }

    fn wants_extension(&self, path: &std::path::Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        if self.extensions.is_empty() {
            return crate::grammar::is_supported_extension(ext);
        }
        let Some(ext) = ext.to_str() else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[cfg(feature = "walk")]
impl Sources for WalkSources {
    fn extract(self) -> Result<Links> {
        let files = self.files()?;
        tracing::info!(
            "Scanning {} files under {}",
            files.len(),
            self.root.display()
        );
        PathSources::new(files).extract()
    }
}
