//! CLI bootstrap - the composition root.
//!
//! Concrete adapters are only instantiated here: the JSON server list
//! store, the Ollama client behind the core aggregator, or the remote
//! explorer client when `--remote` is given.

use std::path::PathBuf;
use std::sync::Arc;

use omx_core::paths::STORAGE_FILE;
use omx_core::{
    Aggregator, InventoryProvider, JsonServerListStore, ServerListService, ServerListStore,
    storage_path,
};
use omx_ollama::{DefaultExplorerApiClient, DefaultOllamaClient};
use tracing::debug;

use crate::commands::FetchArgs;
use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Data directory override; the platform default is used when `None`.
    pub data_dir: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Resolve the storage file location.
    pub fn storage_path(&self) -> Result<PathBuf, CliError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.join(STORAGE_FILE)),
            None => Ok(storage_path()?),
        }
    }
}

/// Composed context handed to command handlers.
pub struct CliContext {
    /// Persistent store for the saved server list.
    pub store: Arc<dyn ServerListStore>,
    /// Location of the storage file, for display.
    pub storage_path: PathBuf,
}

impl CliContext {
    /// Load the saved server list.
    pub async fn server_list(&self) -> Result<ServerListService, CliError> {
        Ok(ServerListService::load(Arc::clone(&self.store)).await?)
    }

    /// Servers to query: the explicit `--servers` list, else the saved one.
    pub async fn resolve_servers(&self, fetch: &FetchArgs) -> Result<Vec<String>, CliError> {
        if !fetch.servers.is_empty() {
            return Ok(fetch.servers.clone());
        }
        let saved = self.server_list().await?;
        if saved.is_empty() {
            return Err(CliError::Arguments(
                "No servers configured. Add one with 'omx servers add <url>' or pass --servers"
                    .to_string(),
            ));
        }
        Ok(saved.servers().to_vec())
    }

    /// The inventory provider for one command invocation.
    pub fn inventory_provider(
        &self,
        fetch: &FetchArgs,
    ) -> Result<Arc<dyn InventoryProvider>, CliError> {
        let config = fetch.client.to_config();
        if let Some(remote) = &fetch.remote {
            debug!(remote = %remote, "Aggregating through remote explorer");
            return Ok(Arc::new(DefaultExplorerApiClient::new(remote, &config)?));
        }
        let client = DefaultOllamaClient::new(&config)?;
        Ok(Arc::new(Aggregator::new(Arc::new(client))))
    }
}

/// Build the CLI context.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let storage_path = config.storage_path()?;
    debug!(path = %storage_path.display(), "Using server list storage");
    Ok(CliContext {
        store: Arc::new(JsonServerListStore::new(storage_path.clone())),
        storage_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ClientArgs;

    fn fetch_args(servers: &[&str]) -> FetchArgs {
        FetchArgs {
            servers: servers.iter().map(ToString::to_string).collect(),
            remote: None,
            client: ClientArgs {
                timeout: 15,
                max_workers: 0,
            },
        }
    }

    fn context(dir: &tempfile::TempDir) -> CliContext {
        let config = CliConfig::default().with_data_dir(Some(dir.path().to_path_buf()));
        bootstrap(&config).unwrap()
    }

    #[test]
    fn test_storage_path_uses_override() {
        let config = CliConfig::default().with_data_dir(Some(PathBuf::from("/tmp/omx-data")));
        assert_eq!(
            config.storage_path().unwrap(),
            PathBuf::from("/tmp/omx-data").join(STORAGE_FILE)
        );
    }

    #[tokio::test]
    async fn test_explicit_servers_win() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let servers = ctx.resolve_servers(&fetch_args(&["a:11434"])).await.unwrap();
        assert_eq!(servers, vec!["a:11434"]);
    }

    #[tokio::test]
    async fn test_saved_servers_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        ctx.server_list().await.unwrap().add("b:11434").await.unwrap();

        let servers = ctx.resolve_servers(&fetch_args(&[])).await.unwrap();
        assert_eq!(servers, vec!["b:11434"]);
    }

    #[tokio::test]
    async fn test_no_servers_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let err = ctx.resolve_servers(&fetch_args(&[])).await.unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_provider_builds() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        assert!(ctx.inventory_provider(&fetch_args(&[])).is_ok());
    }
}
