//! Explorer session state.
//!
//! One explicit value owning everything an explorer front end needs: the
//! source collection, its facet vocabularies, the user's selection, the
//! sort mode and the view layout. Engine functions are pure; the session
//! is the only place they are combined with state and notifications.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::{AggregationStatus, Inventory};
use crate::domain::{FilterSelection, MatchMode, ModelItem, ServerResult};
use crate::error::CoreError;
use crate::export::{ExportDocument, ExportError, ExportFormat, build_export};
use crate::facets::FacetIndex;
use crate::filter::filter_items;
use crate::ports::{ClipboardPort, InventoryProvider, Notification, NotificationSink, ProviderError};
use crate::sort::{SortMode, sort_view};

/// How the view is laid out by the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLayout {
    #[default]
    Grid,
    List,
}

/// Counts for the "showing N of M" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    pub shown: usize,
    pub total: usize,
}

impl fmt::Display for ViewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} models", self.shown, self.total)
    }
}

/// Explorer state.
#[derive(Debug, Clone, Default)]
pub struct ExplorerSession {
    inventory: Inventory,
    facets: FacetIndex,
    selection: FilterSelection,
    sort: SortMode,
    layout: ViewLayout,
}

impl ExplorerSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Aggregation
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the collection with a fresh inventory.
    ///
    /// Facets are rebuilt and the search and facet selections reset. The
    /// match mode, sort mode and layout are kept.
    pub fn apply_inventory(&mut self, inventory: Inventory) -> AggregationStatus {
        self.facets = FacetIndex::from_inventory(&inventory);
        self.selection.clear();
        self.inventory = inventory;
        self.inventory.status()
    }

    /// Fetch from `provider` and apply the result, notifying `sink`.
    ///
    /// When the request itself fails the previous collection stays in place.
    pub async fn refresh(
        &mut self,
        provider: &dyn InventoryProvider,
        servers: &[String],
        sink: &dyn NotificationSink,
    ) -> Result<AggregationStatus, ProviderError> {
        let inventory = match provider.fetch_inventory(servers).await {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(error = %e, "Aggregation failed");
                sink.notify(Notification::AggregationFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        let summary = inventory.failure_summary();
        let status = self.apply_inventory(inventory);
        let notification = match status {
            AggregationStatus::Populated(model_count) => {
                Notification::AggregationSucceeded { model_count }
            }
            AggregationStatus::Empty => Notification::AggregationEmpty,
            AggregationStatus::AllFailed => Notification::AggregationFailed {
                message: format!("All servers failed: {summary}"),
            },
        };
        sink.notify(notification);
        Ok(status)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn items(&self) -> &[ModelItem] {
        &self.inventory.models
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn server_results(&self) -> &[ServerResult] {
        &self.inventory.server_results
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn layout(&self) -> ViewLayout {
        self.layout
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.selection.search = search.into();
    }

    /// Toggle a capability; returns whether it is now active.
    pub fn toggle_capability(&mut self, capability: &str) -> bool {
        self.selection.toggle_capability(capability)
    }

    /// Toggle a family; returns whether it is now active.
    pub fn toggle_family(&mut self, family: &str) -> bool {
        self.selection.toggle_family(family)
    }

    /// Toggle a server; returns whether it is now active.
    pub fn toggle_server(&mut self, server: &str) -> bool {
        self.selection.toggle_server(server)
    }

    pub fn set_match_mode(&mut self, match_mode: MatchMode) {
        self.selection.match_mode = match_mode;
    }

    /// Replace the whole selection at once.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    /// Clear search and facet selections. The match mode is kept.
    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn set_layout(&mut self, layout: ViewLayout) {
        self.layout = layout;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────────────────────

    /// The filtered, sorted view.
    pub fn view(&self) -> Vec<&ModelItem> {
        let mut view = filter_items(&self.inventory.models, &self.selection);
        sort_view(&mut view, self.sort);
        view
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary {
            shown: filter_items(&self.inventory.models, &self.selection).len(),
            total: self.inventory.models.len(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Encode the current view.
    ///
    /// A refused export is reported to `sink`. Success is reported by the
    /// caller once the document has actually been delivered.
    pub fn export(
        &self,
        format: ExportFormat,
        sink: &dyn NotificationSink,
    ) -> Result<ExportDocument, ExportError> {
        let view = self.view();
        match build_export(format, &view, &self.selection) {
            Ok(document) => {
                debug!(format = %format, models = view.len(), "Encoded export");
                Ok(document)
            }
            Err(e) => {
                sink.notify(Notification::ExportFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Encode the current view for the clipboard and write it.
    pub fn copy_to_clipboard(
        &self,
        clipboard: &dyn ClipboardPort,
        sink: &dyn NotificationSink,
    ) -> Result<(), CoreError> {
        let document = self.export(ExportFormat::Clipboard, sink)?;
        if let Err(e) = clipboard.write_text(&document.content) {
            sink.notify(Notification::ExportFailed {
                reason: e.to_string(),
            });
            return Err(e.into());
        }
        sink.notify(Notification::ExportSucceeded {
            target: "clipboard".to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ServerResponse, merge_responses};
    use crate::domain::RawModelItem;
    use crate::ports::ClipboardError;
    use crate::ports::notification::testing::RecordingSink;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const A: &str = "http://a:11434";

    fn raw(name: &str, size: u64, caps: &[&str]) -> RawModelItem {
        RawModelItem {
            name: name.to_string(),
            size: Some(size),
            family: Some("llama".to_string()),
            capabilities: caps.iter().map(ToString::to_string).collect(),
            ..RawModelItem::default()
        }
    }

    fn inventory() -> Inventory {
        merge_responses(vec![ServerResponse::new(
            A,
            Ok(vec![
                raw("mistral", 300, &["completion", "tools"]),
                raw("llava", 500, &["completion", "vision"]),
                raw("gemma", 100, &["completion"]),
            ]),
        )])
    }

    struct StaticProvider(Result<Inventory, ProviderError>);

    #[async_trait]
    impl InventoryProvider for StaticProvider {
        async fn fetch_inventory(&self, _servers: &[String]) -> Result<Inventory, ProviderError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        written: Mutex<Option<String>>,
    }

    impl ClipboardPort for FakeClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable);
            }
            *self.written.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_view_filters_then_sorts() {
        let mut session = ExplorerSession::new();
        session.apply_inventory(inventory());
        session.set_sort(SortMode::SizeDesc);
        session.toggle_capability("tools");
        session.toggle_capability("vision");

        let names: Vec<_> = session.view().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["llava", "mistral"]);
        assert_eq!(session.summary().to_string(), "Showing 2 of 3 models");

        session.set_match_mode(MatchMode::All);
        assert!(session.view().is_empty());
    }

    #[test]
    fn test_apply_inventory_resets_selection_but_keeps_preferences() {
        let mut session = ExplorerSession::new();
        session.apply_inventory(inventory());
        session.set_search("lla");
        session.toggle_family("llama");
        session.set_match_mode(MatchMode::All);
        session.set_sort(SortMode::NameDesc);
        session.set_layout(ViewLayout::List);

        session.apply_inventory(inventory());

        assert!(!session.selection().has_active_filters());
        assert_eq!(session.selection().match_mode, MatchMode::All);
        assert_eq!(session.sort_mode(), SortMode::NameDesc);
        assert_eq!(session.layout(), ViewLayout::List);
        assert!(session.facets().has_capability("vision"));
    }

    #[test]
    fn test_clear_filters_restores_full_view() {
        let mut session = ExplorerSession::new();
        session.apply_inventory(inventory());
        session.set_search("zzz");
        assert!(session.view().is_empty());
        session.clear_filters();
        assert_eq!(session.view().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_notifies_by_status() {
        let sink = RecordingSink::default();
        let mut session = ExplorerSession::new();

        let status = session
            .refresh(&StaticProvider(Ok(inventory())), &[A.to_string()], &sink)
            .await
            .unwrap();
        assert_eq!(status, AggregationStatus::Populated(3));

        let empty = merge_responses(vec![ServerResponse::new(A, Ok(vec![]))]);
        session
            .refresh(&StaticProvider(Ok(empty)), &[A.to_string()], &sink)
            .await
            .unwrap();

        assert_eq!(
            sink.take(),
            vec![
                Notification::AggregationSucceeded { model_count: 3 },
                Notification::AggregationEmpty,
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_collection() {
        let sink = RecordingSink::default();
        let mut session = ExplorerSession::new();
        session.apply_inventory(inventory());

        let err = session
            .refresh(&StaticProvider(Err(ProviderError::NoValidServers)), &[], &sink)
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::NoValidServers);
        assert_eq!(session.items().len(), 3);
        assert_eq!(
            sink.take(),
            vec![Notification::AggregationFailed {
                message: "No valid servers provided".to_string()
            }]
        );
    }

    #[test]
    fn test_export_empty_view_notifies() {
        let sink = RecordingSink::default();
        let session = ExplorerSession::new();

        let err = session.export(ExportFormat::Json, &sink).unwrap_err();
        assert_eq!(err, ExportError::NothingToExport);
        assert_eq!(
            sink.take(),
            vec![Notification::ExportFailed {
                reason: "No models to export".to_string()
            }]
        );
    }

    #[test]
    fn test_copy_to_clipboard() {
        let sink = RecordingSink::default();
        let mut session = ExplorerSession::new();
        session.apply_inventory(inventory());

        let clipboard = FakeClipboard::default();
        session.copy_to_clipboard(&clipboard, &sink).unwrap();
        assert!(clipboard.written.lock().unwrap().as_ref().unwrap().contains("\"total_models\": 3"));

        let broken = FakeClipboard {
            fail: true,
            ..FakeClipboard::default()
        };
        assert!(matches!(
            session.copy_to_clipboard(&broken, &sink),
            Err(CoreError::Clipboard(ClipboardError::Unavailable))
        ));
        assert_eq!(session.items().len(), 3);

        let received = sink.take();
        assert_eq!(received.len(), 2);
        assert!(matches!(received[1], Notification::ExportFailed { .. }));
    }
}
