//! Domain whitelist for links

use crate::links::{Link, Links};
use url::Url;

/// Keeps links whose host is (a subdomain of) a whitelisted domain
#[derive(Debug, Clone, Default)]
pub struct DomainFilter {
    domains: Vec<String>,
}

impl DomainFilter {
    /// Build a filter; domains are compared lowercase.
    /// An empty whitelist lets every link with a host through.
    pub fn new(domains: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The whitelisted domain `url` belongs to.
    ///
    /// With an empty whitelist this is the URL's own host. `None` when the
    /// URL does not parse, has no host, or matches nothing.
    pub fn matching_domain(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_lowercase();

        if self.domains.is_empty() {
            return Some(host);
        }

        self.domains
            .iter()
            .find(|domain| {
                host == **domain
                    || host
                        .strip_suffix(domain.as_str())
                        .is_some_and(|rest| rest.ends_with('.'))
            })
            .cloned()
    }

    pub fn matches(&self, link: &Link) -> bool {
        self.matching_domain(&link.url).is_some()
    }

    /// Keep only links with a matching domain
    pub fn retain(&self, links: Links) -> Links {
        links.into_iter().filter(|l| self.matches(l)).collect::<Vec<_>>().into()
    }
}
