//! Notification sink for user-facing status events.
//!
//! The engine reports outcomes (aggregation results, export results) through
//! this port. Adapters decide how to surface them: toasts, stderr lines,
//! log records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-facing status event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Aggregation finished with at least one item.
    AggregationSucceeded {
        /// Number of merged items.
        model_count: usize,
    },
    /// Aggregation finished but produced no items.
    AggregationEmpty,
    /// Aggregation could not be performed, or every server failed.
    AggregationFailed {
        /// Failure description.
        message: String,
    },
    /// An export or copy completed.
    ExportSucceeded {
        /// File name written, or `clipboard`.
        target: String,
    },
    /// An export or copy was refused or failed.
    ExportFailed {
        /// Failure description.
        reason: String,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AggregationSucceeded { model_count } => {
                write!(f, "Loaded {model_count} models")
            }
            Self::AggregationEmpty => f.write_str("No models were found on the connected servers"),
            Self::AggregationFailed { message } => write!(f, "Error fetching models: {message}"),
            Self::ExportSucceeded { target } if target == "clipboard" => {
                f.write_str("Copied to clipboard!")
            }
            Self::ExportSucceeded { target } => write!(f, "Downloaded {target}"),
            Self::ExportFailed { reason } => write!(f, "Export failed: {reason}"),
        }
    }
}

/// Receives notifications. Must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn notify(&self, _notification: Notification) {}
}
