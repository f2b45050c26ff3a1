//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Browse the models installed across several Ollama servers.
#[derive(Parser)]
#[command(name = "omx")]
#[command(about = "Explore models across Ollama servers")]
#[command(version)]
pub struct Cli {
    /// Override the data directory holding the saved server list
    #[arg(long = "data-dir", env = "OMX_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LayoutArg;
    use crate::servers_commands::ServersCommand;
    use clap::CommandFactory;
    use omx_core::{ExportFormat, MatchMode, SortMode};

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["omx", "--verbose", "--data-dir", "/tmp/omx", "facets"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/omx")));
        assert!(matches!(cli.command, Some(Commands::Facets { .. })));
    }

    #[test]
    fn test_servers_subcommands() {
        let cli = Cli::parse_from(["omx", "servers", "edit", "old:11434", "new:11434"]);
        match cli.command {
            Some(Commands::Servers {
                command: ServersCommand::Edit { old, new },
            }) => {
                assert_eq!(old, "old:11434");
                assert_eq!(new, "new:11434");
            }
            _ => panic!("expected servers edit"),
        }
    }

    #[test]
    fn test_list_filters_and_sort() {
        let cli = Cli::parse_from([
            "omx",
            "list",
            "--search",
            "llama",
            "--capability",
            "vision",
            "--capability",
            "tools",
            "--match-all",
            "--sort",
            "size-desc",
            "--servers",
            "a:11434,b:11434",
            "--layout",
            "grid",
        ]);
        let Some(Commands::List {
            fetch,
            filters,
            sort,
            layout,
        }) = cli.command
        else {
            panic!("expected list");
        };
        assert_eq!(fetch.servers, vec!["a:11434", "b:11434"]);
        assert_eq!(sort, SortMode::SizeDesc);
        assert_eq!(layout, LayoutArg::Grid);

        let selection = filters.to_selection();
        assert_eq!(selection.search, "llama");
        assert_eq!(selection.capabilities.len(), 2);
        assert_eq!(selection.match_mode, MatchMode::All);
    }

    #[test]
    fn test_export_format_parses() {
        let cli = Cli::parse_from(["omx", "export", "--format", "md", "--output", "out.md"]);
        let Some(Commands::Export { format, output, .. }) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(format, ExportFormat::Markdown);
        assert_eq!(output, Some(PathBuf::from("out.md")));
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        assert!(Cli::try_parse_from(["omx", "list", "--sort", "random"]).is_err());
    }
}
