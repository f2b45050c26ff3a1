//! Full JSON export with filter provenance.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ExportError, iso_timestamp};
use crate::domain::{FilterSelection, MatchMode, ModelItem};

#[derive(Serialize)]
struct JsonExport<'a> {
    exported_at: String,
    total_models: usize,
    filters_applied: FiltersApplied<'a>,
    models: Vec<JsonModel<'a>>,
}

#[derive(Serialize)]
struct FiltersApplied<'a> {
    search: Option<&'a str>,
    capabilities: Vec<&'a str>,
    families: Vec<&'a str>,
    servers: Vec<&'a str>,
    match_mode: MatchMode,
}

#[derive(Serialize)]
struct JsonModel<'a> {
    name: &'a str,
    server: &'a str,
    size: Option<u64>,
    size_formatted: Option<&'a str>,
    parameters: Option<&'a str>,
    quantization: Option<&'a str>,
    family: Option<&'a str>,
    max_context: Option<u64>,
    capabilities: Vec<&'a str>,
    modified_at: Option<&'a str>,
}

impl<'a> From<&'a ModelItem> for JsonModel<'a> {
    fn from(item: &'a ModelItem) -> Self {
        Self {
            name: &item.name,
            server: &item.server,
            size: item.size,
            size_formatted: item.size_formatted.as_deref(),
            parameters: item.parameters.as_deref(),
            quantization: item.quantization.as_deref(),
            family: item.family.as_deref(),
            max_context: item.max_context,
            capabilities: item.capabilities.iter().map(String::as_str).collect(),
            modified_at: item.modified_at.as_deref(),
        }
    }
}

pub(super) fn encode(
    view: &[&ModelItem],
    selection: &FilterSelection,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let search = selection.search.trim();
    let document = JsonExport {
        exported_at: iso_timestamp(exported_at),
        total_models: view.len(),
        filters_applied: FiltersApplied {
            search: (!search.is_empty()).then_some(search),
            capabilities: selection.capabilities.iter().map(String::as_str).collect(),
            families: selection.families.iter().map(String::as_str).collect(),
            servers: selection.servers.iter().map(String::as_str).collect(),
            match_mode: selection.match_mode,
        },
        models: view.iter().map(|item| JsonModel::from(*item)).collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    #[test]
    fn test_document_shape() {
        let item = ModelItem::new("llama3:8b", "http://a:11434")
            .with_size(4_661_224_676)
            .with_family("llama")
            .with_capabilities(["tools", "completion"])
            .with_max_context(8);
        let selection = FilterSelection::new()
            .with_search(" llama ")
            .with_capability("tools")
            .with_match_mode(MatchMode::All);
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let encoded = encode(&[&item], &selection, at).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["exported_at"], "2024-06-01T00:00:00.000Z");
        assert_eq!(value["total_models"], 1);
        assert_eq!(
            value["filters_applied"],
            json!({
                "search": "llama",
                "capabilities": ["tools"],
                "families": [],
                "servers": [],
                "match_mode": "all"
            })
        );
        let model = &value["models"][0];
        assert_eq!(model["name"], "llama3:8b");
        assert_eq!(model["size"], 4_661_224_676_u64);
        assert_eq!(model["size_formatted"], "4.3 GB");
        assert_eq!(model["max_context"], 8);
        assert_eq!(model["capabilities"], json!(["completion", "tools"]));
        assert_eq!(model["parameters"], Value::Null);
    }

    #[test]
    fn test_blank_search_is_null() {
        let item = ModelItem::new("x", "http://a:11434");
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let encoded = encode(&[&item], &FilterSelection::new().with_search("   "), at).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["filters_applied"]["search"], Value::Null);
        assert_eq!(value["filters_applied"]["match_mode"], "any");
    }
}
