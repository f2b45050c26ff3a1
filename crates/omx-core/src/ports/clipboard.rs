//! Clipboard port.

use thiserror::Error;

/// Errors from clipboard writes. Never affect engine state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard mechanism is available on this platform.
    #[error("No clipboard is available")]
    Unavailable,

    /// The platform refused the write.
    #[error("Failed to copy to clipboard: {0}")]
    WriteFailed(String),
}

/// Writes text to the platform clipboard.
pub trait ClipboardPort: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
