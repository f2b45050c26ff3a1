//! List command handler.

use omx_core::{SortMode, ViewLayout};

use crate::bootstrap::CliContext;
use crate::commands::{FetchArgs, FilterArgs, LayoutArg};
use crate::error::CliError;
use crate::handlers::fetch_session;
use crate::notifier::ConsoleNotifier;
use crate::presentation::{print_cards, print_server_badges, print_table};

/// Fetch, then print server badges, the view and its summary.
pub async fn execute(
    ctx: &CliContext,
    fetch: &FetchArgs,
    filters: &FilterArgs,
    sort: SortMode,
    layout: LayoutArg,
) -> Result<(), CliError> {
    let notifier = ConsoleNotifier::new();
    let (mut session, _status) = fetch_session(ctx, fetch, &notifier).await?;

    print_server_badges(session.server_results());
    println!();

    session.set_selection(filters.to_selection());
    session.set_sort(sort);
    session.set_layout(layout.into());

    let view = session.view();
    if view.is_empty() {
        println!("No models match the current filters.");
    } else {
        match session.layout() {
            ViewLayout::List => print_table(&view),
            ViewLayout::Grid => print_cards(&view),
        }
    }

    println!();
    println!("{}", session.summary());
    Ok(())
}
