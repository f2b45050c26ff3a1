//! Application services built on top of the ports.

pub mod aggregator;
pub mod server_list;

pub use aggregator::{Aggregator, DEFAULT_SERVER_CONCURRENCY};
pub use server_list::{ServerListError, ServerListService};
