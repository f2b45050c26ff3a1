//! Server address list persistence port.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from server list storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("Storage error: {0}")]
    Io(String),

    /// The stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persists the ordered list of server addresses the user has entered.
///
/// The list is stored whole under a single key; every save overwrites it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerListStore: Send + Sync {
    /// Load the stored list. An absent list loads as empty.
    async fn load(&self) -> Result<Vec<String>, StoreError>;

    /// Overwrite the stored list.
    async fn save(&self, servers: &[String]) -> Result<(), StoreError>;
}
