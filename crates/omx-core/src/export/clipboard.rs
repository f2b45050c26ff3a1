//! Reduced JSON for pasting into chats and issues.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ExportError, iso_timestamp};
use crate::domain::ModelItem;

#[derive(Serialize)]
struct ClipboardExport<'a> {
    exported_at: String,
    total_models: usize,
    models: Vec<ClipboardModel<'a>>,
}

#[derive(Serialize)]
struct ClipboardModel<'a> {
    name: &'a str,
    server: &'a str,
    capabilities: Vec<&'a str>,
    family: Option<&'a str>,
    parameters: Option<&'a str>,
    max_context: Option<u64>,
}

pub(super) fn encode(view: &[&ModelItem], exported_at: DateTime<Utc>) -> Result<String, ExportError> {
    let document = ClipboardExport {
        exported_at: iso_timestamp(exported_at),
        total_models: view.len(),
        models: view
            .iter()
            .map(|item| ClipboardModel {
                name: &item.name,
                server: &item.server,
                capabilities: item.capabilities.iter().map(String::as_str).collect(),
                family: item.family.as_deref(),
                parameters: item.parameters.as_deref(),
                max_context: item.max_context,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
