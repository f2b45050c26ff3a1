//! CLI entry point - the composition root.
//!
//! Loads `.env`, installs logging, bootstraps the context and dispatches
//! to a handler. Errors map to sysexits-style exit codes.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use omx_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// `RUST_LOG` wins, then `LOG_LEVEL`, then `info`. `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            EnvFilter::try_new(level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"))
        })
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::default().with_data_dir(cli.data_dir);
    let ctx = bootstrap(&config)?;

    match command {
        Commands::Servers { command } => handlers::servers::execute(&ctx, command).await,
        Commands::List {
            fetch,
            filters,
            sort,
            layout,
        } => handlers::list::execute(&ctx, &fetch, &filters, sort, layout).await,
        Commands::Facets { fetch } => handlers::facets::execute(&ctx, &fetch).await,
        Commands::Export {
            fetch,
            filters,
            sort,
            format,
            output,
        } => {
            handlers::export::execute(&ctx, &fetch, &filters, sort, format, output.as_deref())
                .await
        }
        Commands::Serve {
            host,
            port,
            cors_origins,
            client,
        } => handlers::serve::execute(host, port, &cors_origins, client.to_config()).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            let code = u8::try_from(e.exit_code()).unwrap_or(1);
            Ok(ExitCode::from(code))
        }
    }
}
