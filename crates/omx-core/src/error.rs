//! Crate-level error aggregating the per-boundary errors.

use thiserror::Error;

use crate::aggregate::AggregationError;
use crate::export::ExportError;
use crate::paths::PathError;
use crate::ports::{ClipboardError, ProviderError, StoreError};
use crate::services::ServerListError;

/// Any failure surfaced by the core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    ServerList(#[from] ServerListError),

    #[error(transparent)]
    Path(#[from] PathError),
}
