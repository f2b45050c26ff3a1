//! Main commands enum and shared argument groups.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use omx_core::{ExportFormat, FilterSelection, MatchMode, SortMode, ViewLayout, normalize_server_url};

use omx_ollama::OllamaClientConfig;

use crate::servers_commands::ServersCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the saved server list
    Servers {
        #[command(subcommand)]
        command: ServersCommand,
    },

    /// Fetch models from every server and print the filtered, sorted view
    List {
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort order: name-asc, name-desc, size-asc, size-desc, modified-desc, modified-asc
        #[arg(long, default_value = "name-asc")]
        sort: SortMode,
        /// Output layout
        #[arg(long, value_enum, default_value_t = LayoutArg::List)]
        layout: LayoutArg,
    },

    /// Fetch models and print the capability, family and server vocabularies
    Facets {
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Export the filtered, sorted view
    Export {
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort order applied before encoding
        #[arg(long, default_value = "name-asc")]
        sort: SortMode,
        /// Document format: json, csv, markdown (md) or clipboard
        #[arg(short, long)]
        format: ExportFormat,
        /// Output file (defaults to ollama-models-<date>.<ext> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP service
    Serve {
        /// Interface to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 5000)]
        port: u16,
        /// Allowed CORS origins: "*" or a comma-separated list
        #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
        cors_origins: String,
        #[command(flatten)]
        client: ClientArgs,
    },
}

/// Provider tuning shared by every command that talks to Ollama.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 15)]
    pub timeout: u64,
    /// Concurrent model inspections per server (0 = auto)
    #[arg(long, env = "MAX_WORKERS", default_value_t = 0)]
    pub max_workers: usize,
}

impl ClientArgs {
    pub fn to_config(&self) -> OllamaClientConfig {
        OllamaClientConfig::new()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_workers(self.max_workers)
    }
}

/// Where to fetch the inventory from.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Servers to query instead of the saved list
    #[arg(long = "servers", value_delimiter = ',', num_args = 1..)]
    pub servers: Vec<String>,
    /// Base URL of a running `omx serve` instance to aggregate through
    #[arg(long, env = "OMX_REMOTE")]
    pub remote: Option<String>,
    #[command(flatten)]
    pub client: ClientArgs,
}

/// Filter selection flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring matched against model names
    #[arg(short, long)]
    pub search: Option<String>,
    /// Required capability (repeatable)
    #[arg(long = "capability")]
    pub capabilities: Vec<String>,
    /// Accepted family (repeatable)
    #[arg(long = "family")]
    pub families: Vec<String>,
    /// Accepted server (repeatable)
    #[arg(long = "server")]
    pub server_filters: Vec<String>,
    /// Require every selected capability instead of any
    #[arg(long)]
    pub match_all: bool,
}

impl FilterArgs {
    /// Build the engine selection. Server filters are normalized the same
    /// way item origins are.
    pub fn to_selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_match_mode(MatchMode::from_match_all(self.match_all));
        for capability in &self.capabilities {
            selection = selection.with_capability(capability.trim());
        }
        for family in &self.families {
            selection = selection.with_family(family.trim());
        }
        for server in self.server_filters.iter().filter_map(|s| normalize_server_url(s)) {
            selection = selection.with_server(server);
        }
        selection
    }
}

/// How `list` prints the view.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    /// One multi-line card per model
    Grid,
    /// One table row per model
    List,
}

impl From<LayoutArg> for ViewLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Grid => Self::Grid,
            LayoutArg::List => Self::List,
        }
    }
}
