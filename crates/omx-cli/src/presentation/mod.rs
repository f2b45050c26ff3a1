//! Shared CLI presentation utilities.
//!
//! Format-only: no filtering or sorting happens here.

pub mod model_display;
pub mod tables;

pub use model_display::{print_cards, print_server_badges, print_table};
pub use tables::{format_optional, print_separator, truncate_string};
