//! Aggregation merge.
//!
//! Combines per-server responses into one [`Inventory`]. A server failure
//! never aborts the merge; it is recorded in that server's [`ServerResult`]
//! and the remaining servers still contribute.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ModelItem, RawModelItem, ServerResult};
use crate::ports::ProviderError;

/// One server's answer, fed into [`merge_responses`].
#[derive(Debug, Clone)]
pub struct ServerResponse {
    /// Normalized server address the request was sent to.
    pub server: String,
    /// Items on success, the failure otherwise.
    pub result: Result<Vec<RawModelItem>, ProviderError>,
}

impl ServerResponse {
    pub fn new(
        server: impl Into<String>,
        result: Result<Vec<RawModelItem>, ProviderError>,
    ) -> Self {
        Self {
            server: server.into(),
            result,
        }
    }
}

/// The merged result of one aggregation.
///
/// This is also the provider wire shape: `capabilities` and `families`
/// serialize as sorted arrays. Decoded items pass through
/// [`ModelItem::from_raw`], so a remote payload is normalized the same way
/// as a direct merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InventoryWire")]
pub struct Inventory {
    /// Every item from every successful server, in response order.
    #[serde(default)]
    pub models: Vec<ModelItem>,
    /// Union of the capability tags of all items.
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// Union of the non-empty families of all items.
    #[serde(default)]
    pub families: BTreeSet<String>,
    /// One entry per requested server, in request order.
    #[serde(default)]
    pub server_results: Vec<ServerResult>,
}

/// Loose decoding shape of [`Inventory`].
#[derive(Deserialize)]
struct InventoryWire {
    #[serde(default)]
    models: Vec<RawModelItem>,
    #[serde(default)]
    capabilities: BTreeSet<String>,
    #[serde(default)]
    families: BTreeSet<String>,
    #[serde(default, alias = "serverResults")]
    server_results: Vec<ServerResult>,
}

impl From<InventoryWire> for Inventory {
    fn from(wire: InventoryWire) -> Self {
        let mut inventory = Self {
            models: Vec::with_capacity(wire.models.len()),
            capabilities: wire.capabilities,
            families: wire.families,
            server_results: wire.server_results,
        };
        inventory.families.retain(|family| !family.is_empty());
        for raw in wire.models {
            let item = ModelItem::from_raw(raw, "");
            inventory.capabilities.extend(item.capabilities.iter().cloned());
            if let Some(family) = &item.family {
                inventory.families.insert(family.clone());
            }
            inventory.models.push(item);
        }
        inventory
    }
}

/// How an aggregation turned out. Never conflates "empty" with "failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStatus {
    /// At least one item was merged.
    Populated(usize),
    /// At least one server answered, but no items came back.
    Empty,
    /// Every requested server failed.
    AllFailed,
}

/// Aggregation outcomes that callers treat as failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("All servers failed: {summary}")]
    AllServersFailed {
        /// Per-server failures joined for display.
        summary: String,
    },
}

impl Inventory {
    /// Classify the merge result.
    pub fn status(&self) -> AggregationStatus {
        if !self.models.is_empty() {
            AggregationStatus::Populated(self.models.len())
        } else if !self.server_results.is_empty()
            && self.server_results.iter().all(|r| !r.success)
        {
            AggregationStatus::AllFailed
        } else {
            AggregationStatus::Empty
        }
    }

    /// Returns the inventory unless every server failed.
    pub fn into_checked(self) -> Result<Self, AggregationError> {
        if self.status() == AggregationStatus::AllFailed {
            return Err(AggregationError::AllServersFailed {
                summary: self.failure_summary(),
            });
        }
        Ok(self)
    }

    /// Failed servers joined as `host - error; host - error`.
    pub fn failure_summary(&self) -> String {
        self.server_results
            .iter()
            .filter(|r| !r.success)
            .map(ServerResult::badge)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Number of servers that answered successfully.
    pub fn successful_servers(&self) -> usize {
        self.server_results.iter().filter(|r| r.success).count()
    }
}

/// Merge per-server responses into one inventory.
///
/// Items keep the order they arrived in, server by server. Items without
/// an origin are attributed to the server that returned them. Vocabularies
/// are rebuilt from the merged items, so they always agree with `models`.
pub fn merge_responses<I>(responses: I) -> Inventory
where
    I: IntoIterator<Item = ServerResponse>,
{
    let mut inventory = Inventory::default();

    for response in responses {
        match response.result {
            Ok(raw_items) => {
                let count = raw_items.len();
                for raw in raw_items {
                    let item = ModelItem::from_raw(raw, &response.server);
                    inventory.capabilities.extend(item.capabilities.iter().cloned());
                    if let Some(family) = &item.family {
                        inventory.families.insert(family.clone());
                    }
                    inventory.models.push(item);
                }
                inventory
                    .server_results
                    .push(ServerResult::succeeded(response.server, count));
            }
            Err(e) => {
                inventory
                    .server_results
                    .push(ServerResult::failed(response.server, e.to_string()));
            }
        }
    }

    inventory
}
