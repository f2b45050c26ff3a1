//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces that the engine expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP client or server types in any signature
//! - Engine functions never call ports; sessions and services do
//! - Failures are domain errors, mapped by adapters at the boundary

pub mod clipboard;
pub mod inventory;
pub mod notification;
pub mod server_store;

pub use clipboard::{ClipboardError, ClipboardPort};
pub use inventory::{InventoryProvider, ProviderError, ServerInventory};
pub use notification::{NoopSink, Notification, NotificationSink};
pub use server_store::{ServerListStore, StoreError};

#[cfg(test)]
pub use server_store::MockServerListStore;
