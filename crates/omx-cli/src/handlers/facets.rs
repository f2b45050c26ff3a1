//! Facets command handler.

use crate::bootstrap::CliContext;
use crate::commands::FetchArgs;
use crate::error::CliError;
use crate::handlers::fetch_session;
use crate::notifier::ConsoleNotifier;

fn print_group<'a>(title: &str, values: impl IntoIterator<Item = &'a String>) {
    println!("{title}:");
    let mut any = false;
    for value in values {
        println!("  {value}");
        any = true;
    }
    if !any {
        println!("  (none)");
    }
}

pub async fn execute(ctx: &CliContext, fetch: &FetchArgs) -> Result<(), CliError> {
    let notifier = ConsoleNotifier::new().quiet(true);
    let (session, _status) = fetch_session(ctx, fetch, &notifier).await?;
    let facets = session.facets();

    print_group("Capabilities", &facets.capabilities);
    println!();
    print_group("Families", &facets.families);
    println!();
    print_group("Servers", &facets.servers);
    Ok(())
}
