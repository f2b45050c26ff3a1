//! URL construction helpers for the Ollama and explorer APIs.

use url::Url;

use crate::error::OllamaResult;

fn endpoint(base: &str, path: &str) -> OllamaResult<Url> {
    Ok(Url::parse(&format!("{}/{path}", base.trim_end_matches('/')))?)
}

/// `GET {server}/api/tags`
pub fn tags_url(server: &str) -> OllamaResult<Url> {
    endpoint(server, "api/tags")
}

/// `POST {server}/api/show`
pub fn show_url(server: &str) -> OllamaResult<Url> {
    endpoint(server, "api/show")
}

/// `POST {explorer}/api/fetch`
pub fn fetch_url(explorer: &str) -> OllamaResult<Url> {
    endpoint(explorer, "api/fetch")
}
