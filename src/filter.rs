//! Narrowing a catalog by free-text query, category and source facet.

use std::fmt;
use std::str::FromStr;

use crate::models::{CatalogItem, Domain, Source, ALL_CATEGORIES};

/// Requested source facet. `All` behaves like no facet at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFacet {
    All,
    Only(Source),
}

impl SourceFacet {
    fn matches(self, source: Option<Source>) -> bool {
        match self {
            SourceFacet::All => true,
            SourceFacet::Only(wanted) => source == Some(wanted),
        }
    }
}

impl FromStr for SourceFacet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SourceFacet::All),
            "official" => Ok(SourceFacet::Only(Source::Official)),
            "community" => Ok(SourceFacet::Only(Source::Community)),
            other => Err(format!(
                "unknown source '{other}' (expected all, official or community)"
            )),
        }
    }
}

impl fmt::Display for SourceFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFacet::All => f.write_str("all"),
            SourceFacet::Only(source) => fmt::Display::fmt(source, f),
        }
    }
}

/// What the user typed and picked. The query is matched as-is: surrounding
/// whitespace is part of the literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub category: String,
    pub source: Option<SourceFacet>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            source: None,
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_source(mut self, source: SourceFacet) -> Self {
        self.source = Some(source);
        self
    }
}

/// Items of `domain` matching every criterion, in their original order.
pub fn filter<'a>(
    domain: Domain,
    items: &'a [CatalogItem],
    criteria: &FilterCriteria,
) -> Vec<&'a CatalogItem> {
    let needle = criteria.query.to_lowercase();
    items
        .iter()
        .filter(|item| category_matches(item, &criteria.category))
        .filter(|item| criteria.source.map_or(true, |facet| facet.matches(item.source)))
        .filter(|item| needle.is_empty() || search_matches(domain, item, &needle))
        .collect()
}

fn category_matches(item: &CatalogItem, category: &str) -> bool {
    category == ALL_CATEGORIES || item.category == category
}

/// `needle` must already be lowercased.
fn search_matches(domain: Domain, item: &CatalogItem, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    if contains(&item.name) || contains(&item.description) {
        return true;
    }
    if domain.has_tags() {
        item.tags.iter().any(|tag| contains(tag))
    } else {
        item.author.as_deref().is_some_and(contains)
    }
}
