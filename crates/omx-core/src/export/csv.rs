//! CSV export (RFC-4180 style quoting).

use std::borrow::Cow;

use crate::domain::ModelItem;

/// Header row, in column order.
pub const CSV_HEADERS: [&str; 9] = [
    "Name",
    "Server",
    "Size",
    "Parameters",
    "Context",
    "Quantization",
    "Family",
    "Capabilities",
    "Modified At",
];

/// Quote a field if it contains a comma, quote or line break.
///
/// Embedded quotes are doubled.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub(super) fn encode(view: &[&ModelItem]) -> String {
    let mut lines = Vec::with_capacity(view.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for item in view {
        let capabilities = item
            .capabilities
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        let context = item.max_context.map(|c| c.to_string()).unwrap_or_default();
        let fields = [
            item.name.as_str(),
            item.server.as_str(),
            item.size_formatted.as_deref().unwrap_or_default(),
            item.parameters.as_deref().unwrap_or_default(),
            context.as_str(),
            item.quantization.as_deref().unwrap_or_default(),
            item.family.as_deref().unwrap_or_default(),
            capabilities.as_str(),
            item.modified_at.as_deref().unwrap_or_default(),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}
