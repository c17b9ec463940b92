//! Data structures for catalog items, identities and remote profiles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::favorites::FavoritesState;

/// Pseudo-category that matches every item of a domain.
pub const ALL_CATEGORIES: &str = "All";

/// One of the four kinds of browsable items. Each has its own catalog and favorites set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    Skills,
    McpServers,
    Tools,
    Plugins,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Skills, Domain::McpServers, Domain::Tools, Domain::Plugins];

    /// Key used in profile documents and catalog files.
    pub fn key(self) -> &'static str {
        match self {
            Domain::Skills => "skills",
            Domain::McpServers => "mcpServers",
            Domain::Tools => "tools",
            Domain::Plugins => "plugins",
        }
    }

    /// Tools carry no tags; their author is searched instead.
    pub fn has_tags(self) -> bool {
        !matches!(self, Domain::Tools)
    }

    /// Only plugins are split into official and community entries.
    pub fn has_source_facet(self) -> bool {
        matches!(self, Domain::Plugins)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "skills" | "skill" => Ok(Domain::Skills),
            "mcpServers" | "mcp-servers" | "servers" | "mcp" => Ok(Domain::McpServers),
            "tools" | "tool" => Ok(Domain::Tools),
            "plugins" | "plugin" => Ok(Domain::Plugins),
            other => Err(UnknownDomain(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain '{0}' (expected skills, mcp-servers, tools or plugins)")]
pub struct UnknownDomain(pub String);

/// Where a plugin comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Official,
    Community,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Official => f.write_str("official"),
            Source::Community => f.write_str("community"),
        }
    }
}

/// A browsable entry in one domain's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// An authenticated user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub provider_data: Vec<String>,
}

impl Identity {
    /// Identity with only a uid set.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
            email_verified: false,
            provider_data: Vec::new(),
        }
    }

    /// Name to show for this user: display name, then email, then uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Profile document kept by the profile store, one per uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProfile {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub favorites: FavoritesState,
    pub created_at: DateTime<Utc>,
}

impl RemoteProfile {
    /// Fresh profile for a first sign-in: empty favorites in every domain.
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            photo_url: identity.photo_url.clone(),
            favorites: FavoritesState::default(),
            created_at: Utc::now(),
        }
    }
}
