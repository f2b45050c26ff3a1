//! Serve command handler.

use omx_axum::{CorsConfig, ServerConfig, start_server};
use omx_ollama::OllamaClientConfig;

use crate::error::CliError;

pub async fn execute(
    host: String,
    port: u16,
    cors_origins: &str,
    client: OllamaClientConfig,
) -> Result<(), CliError> {
    let config = ServerConfig::default()
        .with_host(host)
        .with_port(port)
        .with_cors(CorsConfig::from_origins(cors_origins))
        .with_client(client);

    println!();
    println!("  omx web server starting...");
    println!();
    println!("  API:     http://localhost:{port}/api");
    println!("  Network: http://{}", config.bind_address());
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    start_server(config)
        .await
        .map_err(|e| CliError::Core(format!("Server error: {e:#}")))
}
