//! Filter selection state.
//!
//! The user's active search text, facet choices and capability match mode.
//! Active values are kept in ordered sets, so every consumer (filtering,
//! export provenance) sees them in the same alphabetical order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How selected capabilities combine.
///
/// Only the capability dimension has a selectable combinator; family and
/// server selections are always "any of these buckets".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// At least one selected capability must be present.
    #[default]
    Any,
    /// Every selected capability must be present.
    All,
}

impl MatchMode {
    /// Mode for the "match all" toggle position.
    pub const fn from_match_all(match_all: bool) -> Self {
        if match_all { Self::All } else { Self::Any }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    /// Free-text search against item names.
    pub search: String,
    /// Active capability values.
    pub capabilities: BTreeSet<String>,
    /// Active family values.
    pub families: BTreeSet<String>,
    /// Active server values.
    pub servers: BTreeSet<String>,
    /// Capability combinator.
    pub match_mode: MatchMode,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.families.insert(family.into());
        self
    }

    #[must_use]
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.servers.insert(server.into());
        self
    }

    #[must_use]
    pub const fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Toggle a capability; returns whether it is now active.
    pub fn toggle_capability(&mut self, capability: &str) -> bool {
        toggle(&mut self.capabilities, capability)
    }

    /// Toggle a family; returns whether it is now active.
    pub fn toggle_family(&mut self, family: &str) -> bool {
        toggle(&mut self.families, family)
    }

    /// Toggle a server; returns whether it is now active.
    pub fn toggle_server(&mut self, server: &str) -> bool {
        toggle(&mut self.servers, server)
    }

    /// Normalized search needle: trimmed and lowercased, `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }

    /// Whether any dimension would narrow the collection.
    pub fn has_active_filters(&self) -> bool {
        self.search_term().is_some()
            || !self.capabilities.is_empty()
            || !self.families.is_empty()
            || !self.servers.is_empty()
    }

    /// Clear search text and every facet selection.
    ///
    /// The match mode is a preference rather than a filter and survives.
    pub fn clear(&mut self) {
        self.search.clear();
        self.capabilities.clear();
        self.families.clear();
        self.servers.clear();
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}
