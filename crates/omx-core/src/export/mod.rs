//! Export encoders.
//!
//! Serialize the current view (filtered and sorted) together with the
//! selection that produced it. Every encoder refuses an empty view with
//! [`ExportError::NothingToExport`] before producing any output.

mod clipboard;
mod csv;
mod json;
mod markdown;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{FilterSelection, ModelItem};

pub use self::csv::{CSV_HEADERS, escape_field};
pub use self::markdown::escape_cell;

/// Export file name prefix.
pub const FILE_PREFIX: &str = "ollama-models";

/// Errors from export encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The view is empty; no document is produced.
    #[error("No models to export")]
    NothingToExport,

    /// Serialization failed.
    #[error("Failed to encode export: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Target encoding for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
    /// Reduced JSON meant for the clipboard rather than a file.
    Clipboard,
}

/// Error for an unrecognized export format name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown export format '{0}' (expected one of: json, csv, markdown, clipboard)")]
pub struct ExportFormatParseError(pub String);

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Json, Self::Csv, Self::Markdown, Self::Clipboard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "markdown",
            Self::Clipboard => "clipboard",
        }
    }

    /// File extension, `None` for clipboard exports.
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Json => Some("json"),
            Self::Csv => Some("csv"),
            Self::Markdown => Some("md"),
            Self::Clipboard => None,
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json | Self::Clipboard => "application/json",
            Self::Csv => "text/csv",
            Self::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            "clipboard" => Ok(Self::Clipboard),
            _ => Err(ExportFormatParseError(s.to_string())),
        }
    }
}

/// An encoded export ready to be written or copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub format: ExportFormat,
    /// Suggested file name, `None` for clipboard exports.
    pub file_name: Option<String>,
    pub mime_type: &'static str,
    pub content: String,
}

/// `ollama-models-YYYY-MM-DD.<ext>` for the export moment's calendar date.
pub fn export_file_name(format: ExportFormat, exported_at: DateTime<Utc>) -> Option<String> {
    format
        .extension()
        .map(|ext| format!("{FILE_PREFIX}-{}.{ext}", exported_at.format("%Y-%m-%d")))
}

/// Encode `view` using the current time as the export moment.
pub fn build_export(
    format: ExportFormat,
    view: &[&ModelItem],
    selection: &FilterSelection,
) -> Result<ExportDocument, ExportError> {
    build_export_at(format, view, selection, Utc::now())
}

/// Encode `view` with an explicit export moment.
pub fn build_export_at(
    format: ExportFormat,
    view: &[&ModelItem],
    selection: &FilterSelection,
    exported_at: DateTime<Utc>,
) -> Result<ExportDocument, ExportError> {
    if view.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let content = match format {
        ExportFormat::Json => json::encode(view, selection, exported_at)?,
        ExportFormat::Csv => csv::encode(view),
        ExportFormat::Markdown => markdown::encode(view, selection, exported_at),
        ExportFormat::Clipboard => clipboard::encode(view, exported_at)?,
    };

    Ok(ExportDocument {
        format,
        file_name: export_file_name(format, exported_at),
        mime_type: format.mime_type(),
        content,
    })
}

/// Export timestamp as ISO-8601 UTC with millisecond precision.
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
