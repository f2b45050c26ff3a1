//! Server list command handlers.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::servers_commands::ServersCommand;

pub async fn execute(ctx: &CliContext, command: ServersCommand) -> Result<(), CliError> {
    let mut list = ctx.server_list().await?;

    match command {
        ServersCommand::List => {
            if list.is_empty() {
                println!("No servers saved.");
                println!("Use 'omx servers add <url>' to add one.");
            } else {
                for (index, server) in list.servers().iter().enumerate() {
                    println!("{:>3}. {server}", index + 1);
                }
            }
            println!();
            println!("Stored in {}", ctx.storage_path.display());
        }
        ServersCommand::Add { url } => {
            list.add(&url).await?;
            println!("Added {}", url.trim());
        }
        ServersCommand::Remove { url } => {
            list.remove(&url).await?;
            println!("Removed {}", url.trim());
        }
        ServersCommand::Edit { old, new } => {
            list.edit(&old, &new).await?;
            println!("Replaced {} with {}", old.trim(), new.trim());
        }
        ServersCommand::Clear => {
            list.clear().await?;
            println!("Cleared the server list");
        }
    }

    Ok(())
}
