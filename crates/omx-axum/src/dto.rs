//! Data Transfer Objects (DTOs) for the HTTP API contract.
//!
//! `POST /api/fetch` answers with `omx_core::Inventory` directly; only the
//! request shapes and the health body live here.

use omx_core::{ExportFormat, FilterSelection, RawModelItem, SortMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/fetch`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchRequest {
    /// Server addresses. Non-string entries are ignored.
    #[serde(default)]
    pub servers: Option<Vec<Value>>,
}

impl FetchRequest {
    /// The string entries of `servers`, in order.
    pub fn server_addresses(&self) -> Vec<String> {
        self.servers
            .iter()
            .flatten()
            .filter_map(|s| s.as_str().map(str::to_string))
            .collect()
    }
}

/// Body of `POST /api/export`.
///
/// `models` is the source collection; the selection and sort are applied
/// server-side before encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub models: Vec<RawModelItem>,
    #[serde(default)]
    pub filters: FilterSelection,
    #[serde(default)]
    pub sort: SortMode,
    pub format: ExportFormat,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub const fn healthy() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
