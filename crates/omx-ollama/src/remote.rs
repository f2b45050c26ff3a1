//! Client for a remote explorer service.
//!
//! Delegates the whole aggregation to another explorer's `POST /api/fetch`
//! endpoint instead of talking to Ollama servers directly.

use omx_core::Inventory;
use serde::Serialize;
use tracing::info;
use url::Url;

use crate::config::OllamaClientConfig;
use crate::error::OllamaResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::fetch_url;

/// Default remote explorer client using the reqwest HTTP backend.
pub type DefaultExplorerApiClient = ExplorerApiClient<ReqwestBackend>;

#[derive(Serialize)]
struct FetchRequest<'a> {
    servers: &'a [String],
}

/// Inventory provider backed by a remote explorer service.
pub struct ExplorerApiClient<B: HttpBackend> {
    backend: B,
    endpoint: Url,
}

impl DefaultExplorerApiClient {
    /// Create a client for the explorer service at `base_url`.
    pub fn new(base_url: &str, config: &OllamaClientConfig) -> OllamaResult<Self> {
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            endpoint: fetch_url(base_url)?,
        })
    }
}

impl<B: HttpBackend> ExplorerApiClient<B> {
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> OllamaResult<Self> {
        Ok(Self {
            backend,
            endpoint: fetch_url(base_url)?,
        })
    }

    pub(crate) async fn fetch(&self, servers: &[String]) -> OllamaResult<Inventory> {
        info!(endpoint = %self.endpoint, servers = servers.len(), "Fetching via explorer service");
        self.backend
            .post_json(&self.endpoint, &FetchRequest { servers })
            .await
    }
}
