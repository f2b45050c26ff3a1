//! Server list management.
//!
//! Holds the ordered list of server addresses the user has entered and
//! writes it back to the store after every mutation.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::ports::{ServerListStore, StoreError};

/// Errors from server list edits.
#[derive(Debug, Error)]
pub enum ServerListError {
    #[error("Server address must not be empty")]
    EmptyAddress,

    #[error("Server '{0}' is already in the list")]
    Duplicate(String),

    #[error("Server '{0}' is not in the list")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The user's server list, kept in sync with a [`ServerListStore`].
pub struct ServerListService {
    store: Arc<dyn ServerListStore>,
    servers: Vec<String>,
}

impl ServerListService {
    /// Load the stored list.
    pub async fn load(store: Arc<dyn ServerListStore>) -> Result<Self, ServerListError> {
        let servers = store.load().await?;
        debug!(count = servers.len(), "Loaded server list");
        Ok(Self { store, servers })
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Append an address. Entries are stored as typed (trimmed).
    pub async fn add(&mut self, address: &str) -> Result<(), ServerListError> {
        let address = clean(address)?;
        if self.position(&address).is_some() {
            return Err(ServerListError::Duplicate(address));
        }
        self.servers.push(address);
        self.persist().await
    }

    /// Remove an address.
    pub async fn remove(&mut self, address: &str) -> Result<(), ServerListError> {
        let address = address.trim();
        let index = self
            .position(address)
            .ok_or_else(|| ServerListError::NotFound(address.to_string()))?;
        self.servers.remove(index);
        self.persist().await
    }

    /// Replace an address in place, keeping its position.
    pub async fn edit(&mut self, old: &str, new: &str) -> Result<(), ServerListError> {
        let old = old.trim();
        let new = clean(new)?;
        let index = self
            .position(old)
            .ok_or_else(|| ServerListError::NotFound(old.to_string()))?;
        if self.position(&new).is_some_and(|other| other != index) {
            return Err(ServerListError::Duplicate(new));
        }
        self.servers[index] = new;
        self.persist().await
    }

    /// Remove every address.
    pub async fn clear(&mut self) -> Result<(), ServerListError> {
        self.servers.clear();
        self.persist().await
    }

    fn position(&self, address: &str) -> Option<usize> {
        self.servers.iter().position(|s| s == address)
    }

    async fn persist(&self) -> Result<(), ServerListError> {
        self.store.save(&self.servers).await?;
        debug!(count = self.servers.len(), "Saved server list");
        Ok(())
    }
}

fn clean(address: &str) -> Result<String, ServerListError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ServerListError::EmptyAddress);
    }
    Ok(address.to_string())
}
