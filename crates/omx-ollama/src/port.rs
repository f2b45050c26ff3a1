//! Port trait implementations.
//!
//! Implements the core-owned inventory ports, converting internal
//! `OllamaError`s to `ProviderError`s at the boundary.

use async_trait::async_trait;
use omx_core::{Inventory, InventoryProvider, ProviderError, RawModelItem, ServerInventory};

use crate::client::OllamaClient;
use crate::error::{OllamaError, root_cause};
use crate::http::HttpBackend;
use crate::remote::ExplorerApiClient;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `OllamaError` to core `ProviderError`.
pub(crate) fn map_error(err: OllamaError) -> ProviderError {
    match err {
        OllamaError::ApiRequestFailed {
            message: Some(message),
            status,
            ..
        } if (400..500).contains(&status) => ProviderError::Rejected { message },
        OllamaError::ApiRequestFailed { status, .. } => ProviderError::Status { status },
        OllamaError::Connection { reason } => ProviderError::Connection { reason },
        OllamaError::InvalidResponse { message } => ProviderError::InvalidResponse { message },
        OllamaError::Network(e) => {
            if e.is_decode() {
                ProviderError::InvalidResponse {
                    message: root_cause(&e),
                }
            } else {
                ProviderError::Connection {
                    reason: root_cause(&e),
                }
            }
        }
        OllamaError::InvalidUrl(e) => ProviderError::Connection {
            reason: format!("invalid address: {e}"),
        },
        OllamaError::JsonParse(e) => ProviderError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> ServerInventory for OllamaClient<B> {
    async fn list_models(&self, server: &str) -> Result<Vec<RawModelItem>, ProviderError> {
        self.list_server(server).await.map_err(map_error)
    }
}

#[async_trait]
impl<B: HttpBackend> InventoryProvider for ExplorerApiClient<B> {
    async fn fetch_inventory(&self, servers: &[String]) -> Result<Inventory, ProviderError> {
        self.fetch(servers).await.map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_with_message_are_rejections() {
        let err = map_error(OllamaError::ApiRequestFailed {
            status: 400,
            url: "http://x/api/fetch".to_string(),
            message: Some("No valid servers provided".to_string()),
        });
        assert_eq!(
            err,
            ProviderError::Rejected {
                message: "No valid servers provided".to_string()
            }
        );
        assert_eq!(err.to_string(), "No valid servers provided");
    }

    #[test]
    fn test_server_errors_keep_status() {
        let err = map_error(OllamaError::ApiRequestFailed {
            status: 502,
            url: "http://x/api/tags".to_string(),
            message: Some("bad gateway".to_string()),
        });
        assert_eq!(err, ProviderError::Status { status: 502 });
    }

    #[test]
    fn test_connection_passthrough() {
        let err = map_error(OllamaError::Connection {
            reason: "Connection refused (os error 111)".to_string(),
        });
        assert_eq!(err.to_string(), "Connection failed: Connection refused (os error 111)");
    }
}
