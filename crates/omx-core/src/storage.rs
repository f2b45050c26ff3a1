//! File-backed server list store.
//!
//! The storage file is a flat JSON object of client-local keys. The server
//! list lives under [`SERVER_LIST_KEY`]; other keys are preserved on save.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::SERVER_LIST_KEY;
use crate::ports::{ServerListStore, StoreError};

/// [`ServerListStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonServerListStore {
    path: PathBuf,
}

impl JsonServerListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_object(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "Ignoring unreadable storage file");
                Ok(Map::new())
            }
        }
    }
}

#[async_trait]
impl ServerListStore for JsonServerListStore {
    async fn load(&self) -> Result<Vec<String>, StoreError> {
        let mut object = self.read_object().await?;
        let Some(value) = object.remove(SERVER_LIST_KEY) else {
            return Ok(Vec::new());
        };
        match serde_json::from_value::<Vec<String>>(value) {
            Ok(servers) => Ok(servers),
            Err(e) => {
                warn!(error = %e, "Stored server list is malformed; starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, servers: &[String]) -> Result<(), StoreError> {
        let mut object = self.read_object().await?;
        let list = serde_json::to_value(servers)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        object.insert(SERVER_LIST_KEY.to_string(), list);

        let text = serde_json::to_string_pretty(&Value::Object(object))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}
