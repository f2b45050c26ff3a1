#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod clipboard;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod parser;
pub mod presentation;
pub mod servers_commands;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, FetchArgs, FilterArgs, LayoutArg};
pub use error::CliError;
pub use parser::Cli;
pub use servers_commands::ServersCommand;
