//! Internal error types for Ollama operations.
//!
//! These errors are internal to `omx-ollama` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for Ollama operations.
pub type OllamaResult<T> = Result<T, OllamaError>;

/// Errors related to Ollama API operations.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Request failed with an HTTP error status.
    #[error("Request to {url} failed with status {status}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// `error` field of the response body, when present
        message: Option<String>,
    },

    /// The server could not be reached.
    #[error("Connection failed: {reason}")]
    Connection {
        /// Innermost transport error
        reason: String,
    },

    /// The server answered with an unexpected payload.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// HTTP client error not covered above.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Innermost message in an error's source chain.
pub fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
