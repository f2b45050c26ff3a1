//! Filter engine.
//!
//! Pure conjunction of independent predicates: name search, capabilities
//! (AND or OR per [`MatchMode`]), family membership and server membership.
//! An empty selection on any dimension accepts everything on that dimension.

use crate::domain::{FilterSelection, MatchMode, ModelItem};

/// A selection prepared for repeated evaluation.
///
/// The search term is normalized once up front.
#[derive(Debug, Clone)]
pub struct CompiledFilter<'s> {
    term: Option<String>,
    selection: &'s FilterSelection,
}

impl<'s> CompiledFilter<'s> {
    pub fn new(selection: &'s FilterSelection) -> Self {
        Self {
            term: selection.search_term(),
            selection,
        }
    }

    /// Whether `item` passes every active predicate.
    pub fn accepts(&self, item: &ModelItem) -> bool {
        self.matches_search(item)
            && self.matches_capabilities(item)
            && self.matches_family(item)
            && self.matches_server(item)
    }

    fn matches_search(&self, item: &ModelItem) -> bool {
        self.term
            .as_deref()
            .is_none_or(|term| item.name.to_lowercase().contains(term))
    }

    fn matches_capabilities(&self, item: &ModelItem) -> bool {
        let wanted = &self.selection.capabilities;
        if wanted.is_empty() {
            return true;
        }
        match self.selection.match_mode {
            MatchMode::All => wanted.iter().all(|c| item.has_capability(c)),
            MatchMode::Any => wanted.iter().any(|c| item.has_capability(c)),
        }
    }

    fn matches_family(&self, item: &ModelItem) -> bool {
        let wanted = &self.selection.families;
        wanted.is_empty()
            || item
                .family
                .as_deref()
                .is_some_and(|family| wanted.contains(family))
    }

    fn matches_server(&self, item: &ModelItem) -> bool {
        let wanted = &self.selection.servers;
        wanted.is_empty() || wanted.contains(&item.server)
    }
}

/// Whether a single item passes `selection`.
pub fn matches(item: &ModelItem, selection: &FilterSelection) -> bool {
    CompiledFilter::new(selection).accepts(item)
}

/// Items of `items` that pass `selection`, in their original order.
pub fn filter_items<'a>(items: &'a [ModelItem], selection: &FilterSelection) -> Vec<&'a ModelItem> {
    filter_view(items.iter(), selection)
}

/// Like [`filter_items`], over any sequence of borrowed items.
pub fn filter_view<'a, I>(items: I, selection: &FilterSelection) -> Vec<&'a ModelItem>
where
    I: IntoIterator<Item = &'a ModelItem>,
{
    let filter = CompiledFilter::new(selection);
    items.into_iter().filter(|item| filter.accepts(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "http://a:11434";
    const B: &str = "http://b:11434";

    fn fixture() -> Vec<ModelItem> {
        vec![
            ModelItem::new("Llama3:8b", A)
                .with_family("llama")
                .with_capabilities(["completion", "tools"]),
            ModelItem::new("llava:13b", A)
                .with_family("llama")
                .with_capabilities(["completion", "vision"]),
            ModelItem::new("qwen2.5-coder", B)
                .with_family("qwen2")
                .with_capabilities(["completion", "tools", "insert"]),
            ModelItem::new("nomic-embed-text", B).with_capabilities(["embedding"]),
        ]
    }

    fn names<'a>(view: &[&'a ModelItem]) -> Vec<&'a str> {
        view.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let items = fixture();
        let view = filter_items(&items, &FilterSelection::new());
        assert_eq!(view.len(), items.len());
        assert_eq!(names(&view), vec!["Llama3:8b", "llava:13b", "qwen2.5-coder", "nomic-embed-text"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = fixture();
        let view = filter_items(&items, &FilterSelection::new().with_search("  LLA "));
        assert_eq!(names(&view), vec!["Llama3:8b", "llava:13b"]);
    }

    #[test]
    fn test_capabilities_all_vs_any() {
        let items = fixture();
        let all = FilterSelection::new()
            .with_capability("tools")
            .with_capability("vision")
            .with_match_mode(MatchMode::All);
        assert!(filter_items(&items, &all).is_empty());

        let any = all.clone().with_match_mode(MatchMode::Any);
        assert_eq!(
            names(&filter_items(&items, &any)),
            vec!["Llama3:8b", "llava:13b", "qwen2.5-coder"]
        );
    }

    #[test]
    fn test_single_capability_modes_agree() {
        let items = fixture();
        let any = FilterSelection::new().with_capability("tools");
        let all = any.clone().with_match_mode(MatchMode::All);
        assert_eq!(filter_items(&items, &any), filter_items(&items, &all));
    }

    #[test]
    fn test_family_excludes_items_without_family() {
        let items = fixture();
        let selection = FilterSelection::new().with_family("qwen2").with_family("llama");
        let view = filter_items(&items, &selection);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|i| i.family.is_some()));
    }

    #[test]
    fn test_server_filter() {
        let items = fixture();
        let view = filter_items(&items, &FilterSelection::new().with_server(B));
        assert_eq!(names(&view), vec!["qwen2.5-coder", "nomic-embed-text"]);
    }

    #[test]
    fn test_dimensions_are_conjunctive() {
        let items = fixture();
        let selection = FilterSelection::new()
            .with_search("a")
            .with_capability("tools")
            .with_server(A);
        assert_eq!(names(&filter_items(&items, &selection)), vec!["Llama3:8b"]);
    }

    #[test]
    fn test_filter_view_is_idempotent() {
        let items = fixture();
        let selection = FilterSelection::new().with_capability("completion");
        let once = filter_items(&items, &selection);
        let twice = filter_view(once.iter().copied(), &selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matches_single_item() {
        let item = ModelItem::new("phi3", A).with_capabilities(["completion"]);
        assert!(matches(&item, &FilterSelection::new().with_search("PHI")));
        assert!(!matches(&item, &FilterSelection::new().with_capability("vision")));
    }
}
