//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP, filesystem, terminal).
//!
//! # Structure
//!
//! - `item` - Inventory entries (`RawModelItem`, `ModelItem`)
//! - `server` - Server addresses and per-server summaries
//! - `selection` - Filter selection state and match mode

mod item;
mod selection;
mod server;

pub use item::{
    ModelItem, RawModelItem, context_in_thousands, format_size, parse_timestamp,
};
pub use selection::{FilterSelection, MatchMode};
pub use server::{
    SERVER_LIST_KEY, ServerResult, display_host, normalize_server_list, normalize_server_url,
};
