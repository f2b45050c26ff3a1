//! Command handlers.
//!
//! Handlers follow one pattern: `pub async fn execute(ctx: &CliContext, ...)`.
//! They parse CLI-specific input, drive an `ExplorerSession` and format
//! output for the terminal. Business rules stay in `omx-core`.

pub mod export;
pub mod facets;
pub mod list;
pub mod serve;
pub mod servers;

use omx_core::{AggregationStatus, ExplorerSession, NotificationSink};

use crate::bootstrap::CliContext;
use crate::commands::FetchArgs;
use crate::error::CliError;

/// Fetch the inventory into a fresh session.
///
/// An aggregation where every server failed is an error for the CLI, since
/// nothing downstream can be shown or exported.
pub(crate) async fn fetch_session(
    ctx: &CliContext,
    fetch: &FetchArgs,
    sink: &dyn NotificationSink,
) -> Result<(ExplorerSession, AggregationStatus), CliError> {
    let servers = ctx.resolve_servers(fetch).await?;
    let provider = ctx.inventory_provider(fetch)?;

    let mut session = ExplorerSession::new();
    let status = session.refresh(provider.as_ref(), &servers, sink).await?;
    Ok((session, status))
}
