//! Data directory resolution.
//!
//! Resolution order for the data root:
//! 1. `OMX_DATA_DIR` environment variable
//! 2. System data directory (e.g. `~/.local/share/omx`)

use std::env;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "OMX_DATA_DIR";

/// File holding client-local settings, including the server list.
pub const STORAGE_FILE: &str = "storage.json";

/// Errors from path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Root directory for persisted client state. Created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_local_dir().ok_or(PathError::NoDataDir)?.join("omx"),
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Path of the client storage file.
pub fn storage_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(STORAGE_FILE))
}
