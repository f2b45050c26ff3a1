//! CLI-specific error types and mappings.
//!
//! Maps core and provider errors to exit codes and user-facing messages.

use omx_core::{
    ClipboardError, CoreError, ExportError, PathError, ProviderError, ServerListError, StoreError,
};
use omx_ollama::OllamaError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inventory could not be fetched.
    #[error("{0}")]
    Unavailable(String),

    /// Clipboard or other platform facility failed.
    #[error("{0}")]
    Platform(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 64,   // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Platform(_) => 71,    // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Provider(e) => e.into(),
            CoreError::Aggregation(e) => Self::Unavailable(e.to_string()),
            CoreError::Export(e) => e.into(),
            CoreError::Clipboard(e) => e.into(),
            CoreError::Store(e) => e.into(),
            CoreError::ServerList(e) => e.into(),
            CoreError::Path(e) => e.into(),
        }
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NoServers | ProviderError::NoValidServers => {
                Self::Arguments(err.to_string())
            }
            _ => Self::Unavailable(err.to_string()),
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        Self::Core(err.to_string())
    }
}

impl From<ClipboardError> for CliError {
    fn from(err: ClipboardError) -> Self {
        Self::Platform(err.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<ServerListError> for CliError {
    fn from(err: ServerListError) -> Self {
        match err {
            ServerListError::Store(e) => e.into(),
            other => Self::Arguments(other.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<OllamaError> for CliError {
    fn from(err: OllamaError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
