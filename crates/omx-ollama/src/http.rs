//! HTTP backend abstraction for the Ollama API.
//!
//! A trait-based backend allows dependency injection and easy testing. The
//! production implementation uses reqwest and makes exactly one attempt per
//! request.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::OllamaClientConfig;
use crate::error::{OllamaError, OllamaResult, root_cause};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON.
///
/// This is an implementation detail - external code should use the core
/// inventory ports.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> OllamaResult<T>;

    /// POST a JSON body and deserialize the JSON response.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> OllamaResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend with the configured timeout and user agent.
    pub fn new(config: &OllamaClientConfig) -> OllamaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> OllamaResult<reqwest::Response> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string));
        Err(OllamaError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        })
    }
}

/// Split transport failures into "unreachable" and everything else.
fn classify(err: reqwest::Error) -> OllamaError {
    if err.is_connect() || err.is_timeout() {
        OllamaError::Connection {
            reason: root_cause(&err),
        }
    } else {
        OllamaError::Network(err)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> OllamaResult<T> {
        let response = self.send(self.client.get(url.as_str()), url).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> OllamaResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self
            .send(self.client.post(url.as_str()).json(body), url)
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> OllamaResult<T> {
    let bytes = response.bytes().await.map_err(classify)?;
    serde_json::from_slice(&bytes).map_err(|e| OllamaError::InvalidResponse {
        message: e.to_string(),
    })
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_reqwest_backend_creation() {
        assert!(ReqwestBackend::new(&OllamaClientConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fake_backend_returns_canned_response() {
        let backend = FakeBackend::new()
            .with_response("/api/tags", CannedResponse::Json(json!({"models": []})));

        let url = Url::parse("http://a:11434/api/tags").unwrap();
        let result: Value = backend.get_json(&url).await.unwrap();
        assert_eq!(result, json!({"models": []}));
        assert_eq!(backend.requests(), vec!["GET http://a:11434/api/tags"]);
    }

    #[tokio::test]
    async fn test_fake_backend_matches_post_body() {
        let backend = FakeBackend::new()
            .with_post_response("/api/show", "\"llava\"", CannedResponse::Json(json!({"n": 2})))
            .with_post_response("/api/show", "\"llama3\"", CannedResponse::Json(json!({"n": 1})));

        let url = Url::parse("http://a:11434/api/show").unwrap();
        let result: Value = backend
            .post_json(&url, &json!({"model": "llama3"}))
            .await
            .unwrap();
        assert_eq!(result["n"], 1);
    }

    #[tokio::test]
    async fn test_fake_backend_returns_404_for_unknown_url() {
        let backend = FakeBackend::new();
        let url = Url::parse("http://a:11434/unknown").unwrap();

        let result: OllamaResult<Value> = backend.get_json(&url).await;
        assert!(matches!(
            result,
            Err(OllamaError::ApiRequestFailed { status: 404, .. })
        ));
    }
}
