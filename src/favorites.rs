//! Favorites state and the optimistic toggle transition.
//!
//! The session owns a [`FavoritesState`]; a toggle is applied locally as a
//! [`PendingToggle`] before the remote mutation is issued, and compensated if
//! the mutation fails.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{CatalogItem, Domain};

/// Favorited item ids per domain. Ids are not checked against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesState {
    #[serde(default)]
    skills: BTreeSet<String>,
    #[serde(default)]
    mcp_servers: BTreeSet<String>,
    #[serde(default)]
    tools: BTreeSet<String>,
    #[serde(default)]
    plugins: BTreeSet<String>,
}

impl FavoritesState {
    pub fn ids(&self, domain: Domain) -> &BTreeSet<String> {
        match domain {
            Domain::Skills => &self.skills,
            Domain::McpServers => &self.mcp_servers,
            Domain::Tools => &self.tools,
            Domain::Plugins => &self.plugins,
        }
    }

    fn ids_mut(&mut self, domain: Domain) -> &mut BTreeSet<String> {
        match domain {
            Domain::Skills => &mut self.skills,
            Domain::McpServers => &mut self.mcp_servers,
            Domain::Tools => &mut self.tools,
            Domain::Plugins => &mut self.plugins,
        }
    }

    pub fn contains(&self, domain: Domain, id: &str) -> bool {
        self.ids(domain).contains(id)
    }

    /// Set membership of a single id. Other ids in the domain are untouched.
    pub fn set(&mut self, domain: Domain, id: &str, favorited: bool) {
        let ids = self.ids_mut(domain);
        if favorited {
            ids.insert(id.to_string());
        } else {
            ids.remove(id);
        }
    }

    pub fn is_empty(&self) -> bool {
        Domain::ALL.iter().all(|d| self.ids(*d).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pair each item with whether it is a favorite, keeping item order.
    pub fn annotate<'a>(
        &self,
        domain: Domain,
        items: impl IntoIterator<Item = &'a CatalogItem>,
    ) -> Vec<(&'a CatalogItem, bool)> {
        let ids = self.ids(domain);
        items
            .into_iter()
            .map(|item| (item, ids.contains(&item.id)))
            .collect()
    }
}

/// Operation applied to a profile's favorites set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Add,
    Remove,
}

/// Settled membership after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Favorited,
    NotFavorited,
}

/// A toggle that has been applied locally but not yet confirmed remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub domain: Domain,
    pub item_id: String,
    previous: bool,
}

impl PendingToggle {
    /// Flip the membership of `item_id` in `state` and remember what it was.
    pub fn apply(state: &mut FavoritesState, domain: Domain, item_id: &str) -> Self {
        let previous = state.contains(domain, item_id);
        state.set(domain, item_id, !previous);
        Self {
            domain,
            item_id: item_id.to_string(),
            previous,
        }
    }

    /// Remote operation that mirrors the local flip.
    pub fn op(&self) -> SetOp {
        if self.previous {
            SetOp::Remove
        } else {
            SetOp::Add
        }
    }

    pub fn outcome(&self) -> ToggleOutcome {
        if self.previous {
            ToggleOutcome::NotFavorited
        } else {
            ToggleOutcome::Favorited
        }
    }

    /// Restore the pre-toggle membership of this single id.
    pub fn compensate(&self, state: &mut FavoritesState) {
        state.set(self.domain, &self.item_id, self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(domain: Domain, ids: &[&str]) -> FavoritesState {
        let mut state = FavoritesState::default();
        for id in ids {
            state.set(domain, id, true);
        }
        state
    }

    #[test]
    fn apply_then_compensate_restores_removed_favorite() {
        let mut state = state_with(Domain::Skills, &["a"]);

        let pending = PendingToggle::apply(&mut state, Domain::Skills, "a");
        assert_eq!(pending.op(), SetOp::Remove);
        assert!(state.ids(Domain::Skills).is_empty());

        pending.compensate(&mut state);
        assert_eq!(state, state_with(Domain::Skills, &["a"]));
    }

    #[test]
    fn compensate_leaves_other_ids_alone() {
        let mut state = FavoritesState::default();
        let first = PendingToggle::apply(&mut state, Domain::Tools, "x");
        let second = PendingToggle::apply(&mut state, Domain::Tools, "y");
        assert_eq!(second.outcome(), ToggleOutcome::Favorited);

        first.compensate(&mut state);

        assert!(!state.contains(Domain::Tools, "x"));
        assert!(state.contains(Domain::Tools, "y"));
    }

    #[test]
    fn domains_are_independent() {
        let mut state = state_with(Domain::Skills, &["same-id"]);
        PendingToggle::apply(&mut state, Domain::Plugins, "same-id");
        PendingToggle::apply(&mut state, Domain::Skills, "same-id");

        assert!(!state.contains(Domain::Skills, "same-id"));
        assert!(state.contains(Domain::Plugins, "same-id"));
    }

    #[test]
    fn annotate_marks_favorites_in_order() {
        let item = |id: &str| CatalogItem {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: "DevOps".to_string(),
            tags: vec![],
            author: None,
            source: None,
            link: None,
        };
        let items = vec![item("s1"), item("s2"), item("s3")];
        let state = state_with(Domain::Skills, &["s2"]);

        let flags: Vec<_> = state
            .annotate(Domain::Skills, &items)
            .into_iter()
            .map(|(i, fav)| (i.id.as_str(), fav))
            .collect();
        assert_eq!(flags, vec![("s1", false), ("s2", true), ("s3", false)]);
    }
}
