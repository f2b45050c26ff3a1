//! Internal API types for the Ollama HTTP API.
//!
//! These types are internal to `omx-ollama`. Consumers see `RawModelItem`
//! from `omx-core`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Length of the digest prefix kept for display.
const DIGEST_PREFIX_LEN: usize = 12;

// ============================================================================
// GET /api/tags
// ============================================================================

/// Response of `GET /api/tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<TagModel>,
}

/// One installed model as listed by `/api/tags`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagModel {
    pub name: String,
    pub size: Option<u64>,
    pub digest: Option<String>,
    pub modified_at: Option<String>,
}

impl TagModel {
    /// First twelve characters of the digest.
    pub fn short_digest(&self) -> Option<String> {
        self.digest
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| d.chars().take(DIGEST_PREFIX_LEN).collect())
    }
}

// ============================================================================
// POST /api/show
// ============================================================================

/// Body of `POST /api/show`.
#[derive(Debug, Clone, Serialize)]
pub struct ShowRequest<'a> {
    pub model: &'a str,
}

/// Response of `POST /api/show`; only the fields the explorer reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub details: ModelDetails,
    #[serde(deserialize_with = "null_as_default")]
    pub model_info: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,
}

/// The `details` object of `/api/show`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelDetails {
    pub parent_model: Option<String>,
    pub format: Option<String>,
    pub family: Option<String>,
    pub parameter_size: Option<String>,
    pub quantization_level: Option<String>,
}

impl ShowResponse {
    /// Context window in tokens: the first `model_info` key mentioning
    /// `context_length` that holds an integer.
    pub fn context_length(&self) -> Option<u64> {
        self.model_info
            .iter()
            .filter(|(key, _)| key.to_lowercase().contains("context_length"))
            .find_map(|(_, value)| value.as_u64())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
