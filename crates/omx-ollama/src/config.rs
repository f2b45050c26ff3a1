//! Public configuration for the Ollama client.

use std::time::Duration;

/// Upper bound for the automatic inspection worker count.
const MAX_AUTO_WORKERS: usize = 8;

/// Configuration for the Ollama client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use omx_ollama::OllamaClientConfig;
/// use std::time::Duration;
///
/// let config = OllamaClientConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_max_workers(4);
/// assert_eq!(config.effective_workers(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct OllamaClientConfig {
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Per-request timeout
    pub(crate) timeout: Duration,
    /// Concurrent model inspections per server; 0 picks automatically
    pub(crate) max_workers: usize,
}

impl Default for OllamaClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("omx/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(15),
            max_workers: 0,
        }
    }
}

impl OllamaClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 15 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of concurrent model inspections per server.
    ///
    /// 0 (the default) uses the CPU count, capped at 8.
    #[must_use]
    pub const fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Worker count actually used for inspections. Always at least 1.
    pub fn effective_workers(&self) -> usize {
        if self.max_workers > 0 {
            self.max_workers
        } else {
            num_cpus::get().clamp(1, MAX_AUTO_WORKERS)
        }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
