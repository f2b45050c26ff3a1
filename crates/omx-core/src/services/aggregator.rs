//! Multi-server aggregation service.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, error, info};

use crate::aggregate::{Inventory, ServerResponse, merge_responses};
use crate::domain::normalize_server_list;
use crate::ports::{InventoryProvider, ProviderError, ServerInventory};

/// Default number of servers queried concurrently.
pub const DEFAULT_SERVER_CONCURRENCY: usize = 8;

/// Fans a request out to every server through a [`ServerInventory`] and
/// merges the answers.
///
/// Servers are queried concurrently, one attempt each. Results are merged
/// in request order regardless of completion order.
pub struct Aggregator {
    inventory: Arc<dyn ServerInventory>,
    concurrency: usize,
}

impl Aggregator {
    pub fn new(inventory: Arc<dyn ServerInventory>) -> Self {
        Self {
            inventory,
            concurrency: DEFAULT_SERVER_CONCURRENCY,
        }
    }

    /// Limit the number of servers queried at once (minimum 1).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Query `servers` (already normalized) and merge.
    async fn collect(&self, servers: Vec<String>) -> Inventory {
        let responses: Vec<ServerResponse> = stream::iter(servers)
            .map(|server| {
                let inventory = Arc::clone(&self.inventory);
                async move {
                    let result = inventory.list_models(&server).await;
                    match &result {
                        Ok(items) => debug!(server = %server, count = items.len(), "Listed models"),
                        Err(e) => error!(server = %server, error = %e, "Server listing failed"),
                    }
                    ServerResponse::new(server, result)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        merge_responses(responses)
    }
}

#[async_trait]
impl InventoryProvider for Aggregator {
    async fn fetch_inventory(&self, servers: &[String]) -> Result<Inventory, ProviderError> {
        if servers.is_empty() {
            return Err(ProviderError::NoServers);
        }
        let normalized = normalize_server_list(servers);
        if normalized.is_empty() {
            return Err(ProviderError::NoValidServers);
        }

        info!(servers = normalized.len(), "Fetching models");
        let inventory = self.collect(normalized).await;
        info!(
            models = inventory.models.len(),
            ok = inventory.successful_servers(),
            failed = inventory.server_results.len() - inventory.successful_servers(),
            "Aggregation complete"
        );
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawModelItem;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeInventory {
        responses: HashMap<String, Result<Vec<RawModelItem>, ProviderError>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeInventory {
        fn with(mut self, server: &str, result: Result<Vec<&str>, ProviderError>) -> Self {
            let result = result.map(|names| {
                names
                    .into_iter()
                    .map(|name| RawModelItem {
                        name: name.to_string(),
                        ..RawModelItem::default()
                    })
                    .collect()
            });
            self.responses.insert(server.to_string(), result);
            self
        }
    }

    #[async_trait]
    impl ServerInventory for FakeInventory {
        async fn list_models(&self, server: &str) -> Result<Vec<RawModelItem>, ProviderError> {
            self.calls.lock().unwrap().push(server.to_string());
            self.responses
                .get(server)
                .cloned()
                .unwrap_or(Err(ProviderError::Connection {
                    reason: "unknown host".to_string(),
                }))
        }
    }

    #[tokio::test]
    async fn test_rejects_empty_request() {
        let aggregator = Aggregator::new(Arc::new(FakeInventory::default()));
        assert_eq!(
            aggregator.fetch_inventory(&[]).await.unwrap_err(),
            ProviderError::NoServers
        );
        assert_eq!(
            aggregator
                .fetch_inventory(&["  ".to_string(), String::new()])
                .await
                .unwrap_err(),
            ProviderError::NoValidServers
        );
    }

    #[tokio::test]
    async fn test_normalizes_and_dedupes_before_querying() {
        let fake = Arc::new(FakeInventory::default().with("http://a:11434", Ok(vec!["llama3"])));
        let aggregator = Aggregator::new(Arc::clone(&fake) as Arc<dyn ServerInventory>);

        let inventory = aggregator
            .fetch_inventory(&["a:11434/".to_string(), "http://a:11434".to_string()])
            .await
            .unwrap();

        assert_eq!(*fake.calls.lock().unwrap(), vec!["http://a:11434"]);
        assert_eq!(inventory.models.len(), 1);
        assert_eq!(inventory.models[0].server, "http://a:11434");
    }

    #[tokio::test]
    async fn test_partial_failure_in_request_order() {
        let fake = FakeInventory::default()
            .with("http://b:11434", Ok(vec!["qwen2", "phi3"]))
            .with("http://a:11434", Err(ProviderError::Status { status: 500 }));
        let aggregator = Aggregator::new(Arc::new(fake)).with_concurrency(1);

        let inventory = aggregator
            .fetch_inventory(&["http://a:11434".to_string(), "http://b:11434".to_string()])
            .await
            .unwrap();

        let servers: Vec<_> = inventory.server_results.iter().map(|r| r.server.as_str()).collect();
        assert_eq!(servers, vec!["http://a:11434", "http://b:11434"]);
        assert!(!inventory.server_results[0].success);
        assert_eq!(inventory.server_results[1].model_count, Some(2));
        assert_eq!(inventory.models.len(), 2);
    }
}
