//! Server list management subcommands.

use clap::Subcommand;

/// Commands editing the saved server list.
#[derive(Subcommand)]
pub enum ServersCommand {
    /// Show the saved servers
    List,
    /// Append a server address
    Add {
        /// Server address (e.g. "localhost:11434" or "http://gpu-box:11434")
        url: String,
    },
    /// Remove a server address
    Remove {
        /// Address exactly as listed
        url: String,
    },
    /// Replace a server address, keeping its position
    Edit {
        /// Address exactly as listed
        old: String,
        /// New address
        new: String,
    },
    /// Remove every saved server
    Clear,
}
