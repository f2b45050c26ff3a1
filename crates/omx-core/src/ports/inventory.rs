//! Inventory ports.
//!
//! Two levels of abstraction are exposed:
//!
//! - [`ServerInventory`] lists the models of a single server. Adapters that
//!   speak a host's native API implement this.
//! - [`InventoryProvider`] answers a whole multi-server request with an
//!   already merged [`Inventory`]. The core's `Aggregator` implements it on
//!   top of any `ServerInventory`; remote adapters may implement it directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::aggregate::Inventory;
use crate::domain::RawModelItem;

/// Errors from inventory operations.
///
/// Per-server errors end up in the server's `ServerResult`; only request
/// level errors (no usable servers, a remote provider that cannot be
/// reached) propagate to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The server could not be reached (refused, DNS, timeout).
    #[error("Connection failed: {reason}")]
    Connection {
        /// Transport-level reason
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The server answered with data that could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was wrong with the payload
        message: String,
    },

    /// A remote provider rejected the request.
    #[error("{message}")]
    Rejected {
        /// Message returned by the provider
        message: String,
    },

    /// The request named no servers at all.
    #[error("No servers provided")]
    NoServers,

    /// Every named server was blank after normalization.
    #[error("No valid servers provided")]
    NoValidServers,
}

/// Lists the models of a single server.
#[async_trait]
pub trait ServerInventory: Send + Sync {
    /// List every model on `server` (a normalized base URL).
    ///
    /// One attempt per call; no retry.
    async fn list_models(&self, server: &str) -> Result<Vec<RawModelItem>, ProviderError>;
}

/// Answers a multi-server inventory request.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Fetch and merge the inventories of `servers`.
    ///
    /// Partial failures are reported inside the returned inventory.
    async fn fetch_inventory(&self, servers: &[String]) -> Result<Inventory, ProviderError>;
}
