//! Markdown report export.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::domain::{FilterSelection, MatchMode, ModelItem, display_host};

const TABLE_HEADER: &str = "| Name | Server | Size | Parameters | Context | Family | Capabilities |";
const TABLE_RULE: &str = "|------|--------|------|------------|---------|--------|--------------|";
const FOOTER: &str = "*Generated by Ollama Model Explorer*";
const MISSING: &str = "-";

/// Make a value safe inside a table cell.
///
/// Pipes are escaped and line breaks flattened to spaces.
pub fn escape_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['|', '\n', '\r']) {
        Cow::Owned(
            value
                .replace('|', "\\|")
                .replace("\r\n", " ")
                .replace(['\n', '\r'], " "),
        )
    } else {
        Cow::Borrowed(value)
    }
}

fn cell(value: Option<&str>) -> Cow<'_, str> {
    value
        .filter(|v| !v.is_empty())
        .map_or(Cow::Borrowed(MISSING), escape_cell)
}

fn joined<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn encode(
    view: &[&ModelItem],
    selection: &FilterSelection,
    exported_at: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        "# Ollama Models Export".to_string(),
        String::new(),
        format!("**Exported:** {}", exported_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!("**Total Models:** {}", view.len()),
        String::new(),
    ];

    if selection.has_active_filters() {
        lines.push("## Filters Applied".to_string());
        lines.push(String::new());
        let search = selection.search.trim();
        if !search.is_empty() {
            lines.push(format!("- **Search:** {search}"));
        }
        if !selection.capabilities.is_empty() {
            let mode = match selection.match_mode {
                MatchMode::All => "ALL",
                MatchMode::Any => "ANY",
            };
            lines.push(format!(
                "- **Capabilities ({mode}):** {}",
                joined(&selection.capabilities)
            ));
        }
        if !selection.families.is_empty() {
            lines.push(format!("- **Families:** {}", joined(&selection.families)));
        }
        if !selection.servers.is_empty() {
            lines.push(format!("- **Servers:** {}", joined(&selection.servers)));
        }
        lines.push(String::new());
    }

    lines.push("## Models".to_string());
    lines.push(String::new());
    lines.push(TABLE_HEADER.to_string());
    lines.push(TABLE_RULE.to_string());

    for item in view {
        let capabilities = if item.capabilities.is_empty() {
            MISSING.to_string()
        } else {
            item.capabilities
                .iter()
                .map(|c| format!("`{}`", escape_cell(c)))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let context = item
            .max_context
            .filter(|c| *c > 0)
            .map_or_else(|| MISSING.to_string(), |c| format!("{c}K"));
        let host = display_host(&item.server);

        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {} |",
            escape_cell(&item.name),
            escape_cell(&host),
            cell(item.size_formatted.as_deref()),
            cell(item.parameters.as_deref()),
            context,
            cell(item.family.as_deref()),
            capabilities,
        ));
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}
