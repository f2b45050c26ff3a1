//! Aggregation handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use omx_core::{Inventory, ProviderError};
use serde_json::Value;
use tracing::debug;

use crate::dto::FetchRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// Aggregate the inventories of every server in the request body.
///
/// Per-server failures are reported inside `server_results`; only request
/// validation errors produce a non-2xx status.
pub async fn fetch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Inventory>, HttpError> {
    let Json(payload) = payload?;
    if is_blank(&payload) {
        return Err(HttpError::BadRequest("Invalid JSON payload".to_string()));
    }

    let request: FetchRequest = serde_json::from_value(payload)
        .map_err(|_| HttpError::BadRequest("Invalid JSON payload".to_string()))?;

    let requested = request.servers.as_ref().map_or(0, Vec::len);
    let servers = request.server_addresses();
    debug!(requested, usable = servers.len(), "Fetch request");

    if requested == 0 {
        return Err(ProviderError::NoServers.into());
    }
    if servers.is_empty() {
        return Err(ProviderError::NoValidServers.into());
    }

    Ok(Json(state.inventory.fetch_inventory(&servers).await?))
}

fn is_blank(payload: &Value) -> bool {
    match payload {
        Value::Object(map) => map.is_empty(),
        _ => true,
    }
}
