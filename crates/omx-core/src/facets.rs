//! Facet vocabularies.
//!
//! The selectable values for each filter dimension. Rebuilt from scratch
//! after every aggregation; never edited incrementally.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::aggregate::Inventory;
use crate::domain::ModelItem;

/// Selectable values per filter dimension.
///
/// Capabilities and families are ordered alphabetically. Servers keep the
/// order in which they were first seen in the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetIndex {
    pub capabilities: BTreeSet<String>,
    pub families: BTreeSet<String>,
    pub servers: Vec<String>,
}

impl FacetIndex {
    /// Build all three vocabularies from a collection.
    pub fn build(items: &[ModelItem]) -> Self {
        let mut index = Self::default();
        let mut seen_servers = HashSet::new();
        for item in items {
            index.capabilities.extend(item.capabilities.iter().cloned());
            if let Some(family) = item.family.as_deref().filter(|f| !f.is_empty()) {
                index.families.insert(family.to_string());
            }
            if seen_servers.insert(item.server.as_str()) {
                index.servers.push(item.server.clone());
            }
        }
        index
    }

    /// Build from a merged inventory.
    ///
    /// Uses the inventory's capability and family unions when present and
    /// derives the server list from the items.
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let mut index = Self::build(&inventory.models);
        index.capabilities.extend(inventory.capabilities.iter().cloned());
        index.families.extend(inventory.families.iter().cloned());
        index
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty() && self.families.is_empty() && self.servers.is_empty()
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains(family)
    }

    pub fn has_server(&self, server: &str) -> bool {
        self.servers.iter().any(|s| s == server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ModelItem> {
        vec![
            ModelItem::new("llama3", "http://b:11434")
                .with_family("llama")
                .with_capabilities(["completion", "tools"]),
            ModelItem::new("llava", "http://a:11434")
                .with_family("llama")
                .with_capabilities(["vision", "completion"]),
            ModelItem::new("nomic", "http://b:11434").with_capabilities(["embedding"]),
        ]
    }

    #[test]
    fn test_build_vocabularies() {
        let index = FacetIndex::build(&items());

        let caps: Vec<_> = index.capabilities.iter().map(String::as_str).collect();
        assert_eq!(caps, vec!["completion", "embedding", "tools", "vision"]);
        let families: Vec<_> = index.families.iter().map(String::as_str).collect();
        assert_eq!(families, vec!["llama"]);
        assert_eq!(index.servers, vec!["http://b:11434", "http://a:11434"]);
    }

    #[test]
    fn test_absent_family_not_in_vocabulary() {
        let index = FacetIndex::build(&[ModelItem::new("x", "http://a:11434").with_family("")]);
        assert!(index.families.is_empty());
        assert!(index.has_server("http://a:11434"));
    }

    #[test]
    fn test_servers_deduplicated_in_discovery_order() {
        let items: Vec<ModelItem> = ["c", "a", "c", "b", "a"]
            .iter()
            .enumerate()
            .map(|(i, host)| ModelItem::new(format!("m{i}"), format!("http://{host}:11434")))
            .collect();
        let index = FacetIndex::build(&items);
        assert_eq!(
            index.servers,
            vec!["http://c:11434", "http://a:11434", "http://b:11434"]
        );
    }

    #[test]
    fn test_empty_collection() {
        assert!(FacetIndex::build(&[]).is_empty());
    }
}
