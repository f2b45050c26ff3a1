//! Server addresses and per-server aggregation summaries.

use serde::{Deserialize, Serialize};
use url::Url;

/// Storage key under which the ordered server address list is persisted.
pub const SERVER_LIST_KEY: &str = "ollama-explorer-servers";

/// Status of one requested server after an aggregation.
///
/// Used for status display only; never part of the item collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResult {
    /// Normalized server address.
    pub server: String,
    /// Whether the inventory listing succeeded.
    pub success: bool,
    /// Number of items contributed (successful servers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_count: Option<usize>,
    /// Failure description (failed servers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerResult {
    /// Summary for a server that answered with `model_count` items.
    pub fn succeeded(server: impl Into<String>, model_count: usize) -> Self {
        Self {
            server: server.into(),
            success: true,
            model_count: Some(model_count),
            error: None,
        }
    }

    /// Summary for a server that could not be listed.
    pub fn failed(server: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            success: false,
            model_count: None,
            error: Some(error.into()),
        }
    }

    /// One-line badge text, e.g. `gpu-box:11434 (4 models)`.
    pub fn badge(&self) -> String {
        let host = display_host(&self.server);
        if self.success {
            format!("{host} ({} models)", self.model_count.unwrap_or(0))
        } else {
            format!("{host} - {}", self.error.as_deref().unwrap_or("unknown error"))
        }
    }
}

/// Normalize a user-entered server address.
///
/// Trims whitespace and trailing slashes and adds `http://` when no scheme
/// is given. Returns `None` for blank input.
///
/// ```
/// use omx_core::normalize_server_url;
///
/// assert_eq!(
///     normalize_server_url(" localhost:11434/ ").as_deref(),
///     Some("http://localhost:11434")
/// );
/// assert_eq!(normalize_server_url("   "), None);
/// ```
pub fn normalize_server_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("http://{trimmed}"))
    }
}

/// Normalize and de-duplicate a list of addresses, keeping first occurrences.
pub fn normalize_server_list<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for entry in raw {
        if let Some(normalized) = normalize_server_url(entry.as_ref()) {
            if !out.contains(&normalized) {
                out.push(normalized);
            }
        }
    }
    out
}

/// Host (and non-default port) of a server address, for compact display.
///
/// Falls back to the address itself when it does not parse as a URL.
pub fn display_host(server: &str) -> String {
    Url::parse(server)
        .ok()
        .and_then(|url| {
            let host = url.host_str()?.to_string();
            Some(match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host,
            })
        })
        .unwrap_or_else(|| server.to_string())
}
