#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod export;
pub mod facets;
pub mod filter;
pub mod paths;
pub mod ports;
pub mod services;
pub mod session;
pub mod sort;
pub mod storage;

// Re-export commonly used types for convenience
pub use aggregate::{
    AggregationError, AggregationStatus, Inventory, ServerResponse, merge_responses,
};
pub use domain::{
    FilterSelection, MatchMode, ModelItem, RawModelItem, SERVER_LIST_KEY, ServerResult,
    context_in_thousands, display_host, format_size, normalize_server_list, normalize_server_url,
    parse_timestamp,
};
pub use error::CoreError;
pub use export::{
    ExportDocument, ExportError, ExportFormat, ExportFormatParseError, build_export,
    build_export_at, export_file_name,
};
pub use facets::FacetIndex;
pub use filter::{CompiledFilter, filter_items, filter_view, matches};
pub use paths::{PathError, data_root, storage_path};
pub use ports::{
    ClipboardError, ClipboardPort, InventoryProvider, NoopSink, Notification, NotificationSink,
    ProviderError, ServerInventory, ServerListStore, StoreError,
};
pub use services::{Aggregator, ServerListError, ServerListService};
pub use session::{ExplorerSession, ViewLayout, ViewSummary};
pub use sort::{SortMode, SortModeParseError, locale_compare, sort_view, sorted};
pub use storage::JsonServerListStore;

// Only used by the integration tests
#[cfg(test)]
use csv as _;
