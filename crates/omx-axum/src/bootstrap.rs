//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together
//! for the web adapter.

use std::sync::Arc;

use anyhow::Result;
use omx_core::services::DEFAULT_SERVER_CONCURRENCY;
use omx_core::{Aggregator, InventoryProvider};
use omx_ollama::{DefaultOllamaClient, OllamaClientConfig};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::create_router;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Parse a `CORS_ORIGINS` value: `*` or a comma-separated origin list.
    pub fn from_origins(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins)
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Ollama client settings used for every aggregation.
    pub client: OllamaClientConfig,
    /// Servers queried concurrently per aggregation.
    pub server_concurrency: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors: CorsConfig::default(),
            client: OllamaClientConfig::default(),
            server_concurrency: DEFAULT_SERVER_CONCURRENCY,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: OllamaClientConfig) -> Self {
        self.client = client;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Aggregates inventories across the requested servers.
    pub inventory: Arc<dyn InventoryProvider>,
}

impl AxumContext {
    pub fn new(inventory: Arc<dyn InventoryProvider>) -> Self {
        Self { inventory }
    }
}

/// Build the context: an Ollama client behind the core aggregator.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let client = DefaultOllamaClient::new(&config.client)?;
    let aggregator =
        Aggregator::new(Arc::new(client)).with_concurrency(config.server_concurrency);

    info!(
        timeout_secs = config.client.timeout().as_secs(),
        inspection_workers = config.client.effective_workers(),
        server_concurrency = config.server_concurrency,
        "Axum bootstrap complete"
    );

    Ok(AxumContext::new(Arc::new(aggregator)))
}

/// Start the web server and serve until the process ends.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config)?;
    let app = create_router(ctx, &config.cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("omx web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_from_origins() {
        assert_eq!(CorsConfig::from_origins("*"), CorsConfig::AllowAll);
        assert_eq!(CorsConfig::from_origins(""), CorsConfig::AllowAll);
        assert_eq!(
            CorsConfig::from_origins("http://a.lan, http://b.lan"),
            CorsConfig::AllowOrigins(vec!["http://a.lan".to_string(), "http://b.lan".to_string()])
        );
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.cors, CorsConfig::AllowAll);
    }

    #[test]
    fn test_bootstrap_builds_context() {
        let config = ServerConfig::default().with_port(0);
        assert!(bootstrap(&config).is_ok());
    }
}
