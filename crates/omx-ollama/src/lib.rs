#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// The default client aliases are meant to be used through the core port
// traits, not through their internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod remote;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Clients
pub use client::DefaultOllamaClient;
pub use remote::DefaultExplorerApiClient;

// Configuration
pub use config::OllamaClientConfig;

// Construction errors
pub use error::OllamaError;
