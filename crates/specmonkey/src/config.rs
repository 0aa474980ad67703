//! Configuration schema for specmonkey
//!
//! The config is a YAML file naming which extensions to scan, which domains
//! to index, and the repositories involved.

use eyre::{Result, WrapErr};
use facet::Facet;
use std::path::Path;
use tracing::info;

/// Root configuration for specmonkey
#[derive(Debug, Clone, PartialEq, Facet)]
pub struct Config {
    /// File extensions to scan (without the dot). Empty means every
    /// extension specmonkey has a comment grammar for.
    #[facet(default)]
    pub extensions: Vec<String>,

    /// Domains to index. Subdomains match too; empty means every domain.
    #[facet(default)]
    pub domains: Vec<String>,

    /// Repository whose sources get scanned
    #[facet(default)]
    pub source_repository: Repository,

    /// Repository the index gets written to
    #[facet(default)]
    pub index_repository: Repository,
}

/// A git repository and the branch to use
#[derive(Debug, Clone, PartialEq, Facet)]
pub struct Repository {
    pub url: String,
    pub branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["h".to_string(), "cpp".to_string()],
            domains: vec!["example.com".to_string()],
            source_repository: Repository::default(),
            index_repository: Repository::default(),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self {
            url: "https://github.com/org/repo".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl Config {
    /// Parse a config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        facet_yaml::from_str(content).wrap_err("Failed to parse config YAML")
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            eyre::bail!(
                "Config file not found at {}\n\n\
                 Create one with:\n\n    specmonkey create-config {}",
                path.display(),
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Parsed config file {}", path.display());
        Ok(config)
    }

    /// Write the default config to `path`, replacing any existing file
    pub fn write_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = facet_yaml::to_string(&Self::default())?;
        std::fs::write(path, yaml)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Wrote default config to {}", path.display());
        Ok(())
    }
}
