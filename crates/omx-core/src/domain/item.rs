//! Inventory item types.
//!
//! `RawModelItem` is the loose shape an inventory source hands over;
//! `ModelItem` is the canonical, immutable entry every engine function
//! borrows from. Nothing in the engine mutates a `ModelItem` after
//! construction.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Raw Items
// ─────────────────────────────────────────────────────────────────────────────

/// One model entry as reported by an inventory source.
///
/// Field names follow the provider wire format (snake_case). The camelCase
/// spellings are accepted as aliases since naming is an encoding detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawModelItem {
    /// Model name, unique within one server.
    pub name: String,
    /// Origin server; back-filled by the merge when absent.
    pub server: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Human-readable size (e.g. "3.8 GB").
    #[serde(alias = "sizeFormatted")]
    pub size_formatted: Option<String>,
    /// Parameter size label (e.g. "8B").
    pub parameters: Option<String>,
    /// Quantization level (e.g. "`Q4_K_M`").
    pub quantization: Option<String>,
    /// Model family (e.g. "llama").
    pub family: Option<String>,
    /// Context window in thousands of tokens.
    #[serde(alias = "maxContext")]
    pub max_context: Option<u64>,
    /// Context window in tokens.
    #[serde(alias = "contextLength")]
    pub context_length: Option<u64>,
    /// Capability tags (e.g. "completion", "vision", "tools").
    #[serde(deserialize_with = "null_as_empty")]
    pub capabilities: Vec<String>,
    /// Last modification timestamp as reported by the server.
    #[serde(alias = "modifiedAt")]
    pub modified_at: Option<String>,
    /// Short content digest.
    pub digest: Option<String>,
    /// Weight file format (e.g. "gguf").
    pub format: Option<String>,
    /// Model this one was derived from.
    #[serde(alias = "parentModel")]
    pub parent_model: Option<String>,
    /// Inspection error, when details could not be read.
    pub error: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Canonical Items
// ─────────────────────────────────────────────────────────────────────────────

/// A canonical inventory entry merged from one server response.
///
/// Empty strings from the provider are normalized to `None`, and the
/// capability list is collapsed into an ordered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelItem {
    pub name: String,
    pub server: String,
    pub size: Option<u64>,
    pub size_formatted: Option<String>,
    pub parameters: Option<String>,
    pub quantization: Option<String>,
    pub family: Option<String>,
    pub max_context: Option<u64>,
    pub context_length: Option<u64>,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    pub modified_at: Option<String>,
    pub digest: Option<String>,
    pub format: Option<String>,
    pub parent_model: Option<String>,
    pub error: Option<String>,
}

impl ModelItem {
    /// Create a bare item with only the required fields set.
    pub fn new(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            size: None,
            size_formatted: None,
            parameters: None,
            quantization: None,
            family: None,
            max_context: None,
            context_length: None,
            capabilities: BTreeSet::new(),
            modified_at: None,
            digest: None,
            format: None,
            parent_model: None,
            error: None,
        }
    }

    /// Build the canonical item from a raw provider entry.
    ///
    /// `server` is used when the raw entry carries no origin of its own.
    pub fn from_raw(raw: RawModelItem, server: &str) -> Self {
        let server = non_empty(raw.server).unwrap_or_else(|| server.to_string());
        let size_formatted =
            non_empty(raw.size_formatted).or_else(|| raw.size.map(format_size));
        let max_context = raw
            .max_context
            .or_else(|| raw.context_length.map(context_in_thousands));

        Self {
            name: raw.name,
            server,
            size: raw.size,
            size_formatted,
            parameters: non_empty(raw.parameters),
            quantization: non_empty(raw.quantization),
            family: non_empty(raw.family),
            max_context,
            context_length: raw.context_length,
            capabilities: raw
                .capabilities
                .into_iter()
                .filter(|cap| !cap.is_empty())
                .collect(),
            modified_at: non_empty(raw.modified_at),
            digest: non_empty(raw.digest),
            format: non_empty(raw.format),
            parent_model: non_empty(raw.parent_model),
            error: non_empty(raw.error),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self.size_formatted = Some(format_size(size));
        self
    }

    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    #[must_use]
    pub fn with_quantization(mut self, quantization: impl Into<String>) -> Self {
        self.quantization = Some(quantization.into());
        self
    }

    #[must_use]
    pub const fn with_max_context(mut self, max_context: u64) -> Self {
        self.max_context = Some(max_context);
        self
    }

    #[must_use]
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_modified_at(mut self, modified_at: impl Into<String>) -> Self {
        self.modified_at = Some(modified_at.into());
        self
    }

    /// Size used for ordering; absent sizes count as zero.
    pub fn size_or_zero(&self) -> u64 {
        self.size.unwrap_or(0)
    }

    /// Whether the item carries the given capability tag.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Instant used for ordering by modification time.
    ///
    /// An absent timestamp is the Unix epoch; an unparseable one is the
    /// earliest representable instant.
    pub fn modified_instant(&self) -> DateTime<Utc> {
        match self.modified_at.as_deref() {
            None => DateTime::<Utc>::UNIX_EPOCH,
            Some(raw) => parse_timestamp(raw).unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Value helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Format a byte count with 1024-based units and one decimal place.
///
/// ```
/// use omx_core::format_size;
///
/// assert_eq!(format_size(512), "512.0 B");
/// assert_eq!(format_size(4_661_224_676), "4.3 GB");
/// ```
#[allow(clippy::cast_precision_loss)] // display only
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} PB")
}

/// Convert a context length in tokens to whole thousands (1024-based).
pub const fn context_in_thousands(tokens: u64) -> u64 {
    tokens.saturating_add(512) / 1024
}

/// Parse a provider timestamp.
///
/// Accepts RFC 3339 (what Ollama emits), naive ISO-8601 date-times read as
/// UTC, and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
