//! Ollama client for listing and inspecting installed models.

mod inspect;

use crate::config::OllamaClientConfig;
use crate::error::OllamaResult;
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Ollama client using the reqwest HTTP backend.
pub type DefaultOllamaClient = OllamaClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Ollama HTTP API of any number of servers.
///
/// Generic over an HTTP backend for testing. Use [`DefaultOllamaClient`] in
/// production code.
pub struct OllamaClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) workers: usize,
}

impl DefaultOllamaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &OllamaClientConfig) -> OllamaResult<Self> {
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            workers: config.effective_workers(),
        })
    }
}

impl<B: HttpBackend> OllamaClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: &OllamaClientConfig, backend: B) -> Self {
        Self {
            backend,
            workers: config.effective_workers(),
        }
    }
}
