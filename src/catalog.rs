//! Catalog store: the browsable items of every domain, loaded once at start.
//!
//! A catalog document has one section per domain key, each declaring its
//! closed category set and its items:
//!
//! ```json
//! { "skills": { "categories": ["DevOps"], "items": [ { "id": "git-helper", ... } ] } }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::filter::{self, FilterCriteria};
use crate::models::{CatalogItem, Domain, ALL_CATEGORIES};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

fn build_http_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("agentdir/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(30))
        .build()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainCatalog {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    skills: DomainCatalog,
    #[serde(default)]
    mcp_servers: DomainCatalog,
    #[serde(default)]
    tools: DomainCatalog,
    #[serde(default)]
    plugins: DomainCatalog,
}

/// Immutable items of all domains.
#[derive(Debug, Clone)]
pub struct Catalog {
    domains: BTreeMap<Domain, DomainCatalog>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load from `builtin`, an http(s) URL, or a file path.
    pub fn open(location: &str) -> Result<Self, CatalogError> {
        let location = location.trim();
        if location.is_empty() || location == "builtin" {
            Self::builtin()
        } else if location.starts_with("http://") || location.starts_with("https://") {
            Self::fetch(location)
        } else {
            Self::load(Path::new(&*shellexpand::tilde(location)))
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
            path: path.display().to_string(),
            cause: e,
        })?;
        Self::from_json(&content)
    }

    pub fn fetch(url: &str) -> Result<Self, CatalogError> {
        let client = build_http_client().map_err(CatalogError::HttpClient)?;
        let fetch_failed = |cause| CatalogError::FetchFailed {
            url: url.to_string(),
            cause,
        };
        let resp = client.get(url).send().map_err(fetch_failed)?;
        let resp = resp.error_for_status().map_err(fetch_failed)?;
        let content = resp.text().map_err(fetch_failed)?;
        tracing::debug!(url, bytes = content.len(), "fetched catalog");
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let domains = BTreeMap::from([
            (Domain::Skills, file.skills),
            (Domain::McpServers, file.mcp_servers),
            (Domain::Tools, file.tools),
            (Domain::Plugins, file.plugins),
        ]);
        let catalog = Self { domains };
        catalog.validate()?;
        tracing::debug!(
            skills = catalog.items(Domain::Skills).len(),
            mcp_servers = catalog.items(Domain::McpServers).len(),
            tools = catalog.items(Domain::Tools).len(),
            plugins = catalog.items(Domain::Plugins).len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (&domain, section) in &self.domains {
            if section.categories.iter().any(|c| c == ALL_CATEGORIES) {
                return Err(CatalogError::ReservedCategory { domain });
            }
            let mut seen = HashSet::new();
            for item in &section.items {
                if !seen.insert(item.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        domain,
                        id: item.id.clone(),
                    });
                }
                if !section.categories.contains(&item.category) {
                    return Err(CatalogError::UnknownCategory {
                        domain,
                        id: item.id.clone(),
                        category: item.category.clone(),
                    });
                }
                if item.source.is_some() && !domain.has_source_facet() {
                    return Err(CatalogError::UnexpectedSource {
                        domain,
                        id: item.id.clone(),
                    });
                }
                // Search ignores tags in these domains.
                if !item.tags.is_empty() && !domain.has_tags() {
                    return Err(CatalogError::UnexpectedTags {
                        domain,
                        id: item.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn items(&self, domain: Domain) -> &[CatalogItem] {
        self.domains
            .get(&domain)
            .map(|d| d.items.as_slice())
            .unwrap_or_default()
    }

    /// Categories offered for `domain`, starting with the implicit "All".
    pub fn categories(&self, domain: Domain) -> Vec<&str> {
        let declared = self
            .domains
            .get(&domain)
            .map(|d| d.categories.as_slice())
            .unwrap_or_default();
        std::iter::once(ALL_CATEGORIES)
            .chain(declared.iter().map(String::as_str))
            .collect()
    }

    pub fn has_category(&self, domain: Domain, category: &str) -> bool {
        self.categories(domain).contains(&category)
    }

    pub fn get(&self, domain: Domain, id: &str) -> Option<&CatalogItem> {
        self.items(domain).iter().find(|item| item.id == id)
    }

    pub fn search(&self, domain: Domain, criteria: &FilterCriteria) -> Vec<&CatalogItem> {
        filter::filter(domain, self.items(domain), criteria)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {cause}")]
    ReadFailed {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to fetch {url}: {cause}")]
    FetchFailed {
        url: String,
        #[source]
        cause: reqwest::Error,
    },

    #[error("duplicate id '{id}' in {domain}")]
    DuplicateId { domain: Domain, id: String },

    #[error("item '{id}' in {domain} uses undeclared category '{category}'")]
    UnknownCategory {
        domain: Domain,
        id: String,
        category: String,
    },

    #[error("{domain} declares the reserved category \"All\"")]
    ReservedCategory { domain: Domain },

    #[error("item '{id}' in {domain} has a source, which only plugins may have")]
    UnexpectedSource { domain: Domain, id: String },

    #[error("item '{id}' in {domain} has tags, but {domain} items are searched by author")]
    UnexpectedTags { domain: Domain, id: String },
}
