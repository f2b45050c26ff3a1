//! Integration tests for the Axum web server.
//!
//! Routes are exercised through `oneshot` with a fake inventory provider,
//! so no Ollama server is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use omx_axum::bootstrap::{AxumContext, CorsConfig};
use omx_axum::routes::create_router;
use omx_core::{
    Inventory, InventoryProvider, ProviderError, RawModelItem, ServerResponse, merge_responses,
    normalize_server_list,
};

/// Answers every server with one model, except hosts containing "down".
#[derive(Default)]
struct FakeProvider {
    calls: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl InventoryProvider for FakeProvider {
    async fn fetch_inventory(&self, servers: &[String]) -> Result<Inventory, ProviderError> {
        self.calls.lock().unwrap().push(servers.to_vec());
        let normalized = normalize_server_list(servers);
        if normalized.is_empty() {
            return Err(ProviderError::NoValidServers);
        }
        Ok(merge_responses(normalized.into_iter().map(|server| {
            if server.contains("down") {
                ServerResponse::new(
                    server,
                    Err(ProviderError::Connection {
                        reason: "connection refused".to_string(),
                    }),
                )
            } else {
                ServerResponse::new(
                    server,
                    Ok(vec![RawModelItem {
                        name: "llama3:8b".to_string(),
                        family: Some("llama".to_string()),
                        capabilities: vec!["completion".to_string(), "tools".to_string()],
                        size: Some(4_661_224_676),
                        ..RawModelItem::default()
                    }]),
                )
            }
        })))
    }
}

fn app_with(provider: Arc<FakeProvider>) -> Router {
    create_router(AxumContext::new(provider), &CorsConfig::AllowAll)
}

fn app() -> Router {
    app_with(Arc::new(FakeProvider::default()))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let response = app()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}

#[tokio::test]
async fn fetch_merges_servers_and_reports_failures() {
    let provider = Arc::new(FakeProvider::default());
    let response = app_with(provider.clone())
        .oneshot(post_json(
            "/api/fetch",
            r#"{"servers": ["gpu-box:11434", "http://down:11434", 7]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["models"].as_array().unwrap().len(), 1);
    assert_eq!(body["models"][0]["server"], "http://gpu-box:11434");
    assert_eq!(body["capabilities"], json!(["completion", "tools"]));
    assert_eq!(body["families"], json!(["llama"]));

    let results = body["server_results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[1]["success"], false);
    assert!(results[1]["error"].as_str().unwrap().contains("connection refused"));

    // Non-string entries never reach the provider
    assert_eq!(
        provider.calls.lock().unwrap()[0],
        vec!["gpu-box:11434".to_string(), "http://down:11434".to_string()]
    );
}

#[tokio::test]
async fn fetch_rejects_invalid_payloads() {
    let cases = [
        ("not json", "Invalid JSON payload"),
        ("null", "Invalid JSON payload"),
        ("{}", "Invalid JSON payload"),
        (r#"{"servers": []}"#, "No servers provided"),
        (r#"{"servers": null}"#, "No servers provided"),
        (r#"{"servers": [1, true]}"#, "No valid servers provided"),
        (r#"{"servers": ["   "]}"#, "No valid servers provided"),
    ];

    for (body, expected) in cases {
        let response = app().oneshot(post_json("/api/fetch", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert_eq!(json["error"], expected, "body: {body}");
        assert_eq!(json["status"], 400);
    }
}

fn export_body(format: &str, filters: Value) -> String {
    json!({
        "models": [
            {"name": "mistral:7b", "server": "http://a:11434", "capabilities": ["completion"]},
            {"name": "llava:13b", "server": "http://b:11434", "capabilities": ["completion", "vision"]},
        ],
        "filters": filters,
        "sort": "name-asc",
        "format": format,
    })
    .to_string()
}

#[tokio::test]
async fn export_csv_sets_download_headers() {
    let response = app()
        .oneshot(post_json("/api/export", &export_body("csv", json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"ollama-models-"));
    assert!(disposition.ends_with(".csv\""));

    let text = body_text(response).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Name,Server,Size"));
    assert!(lines[1].starts_with("llava:13b,"));
    assert!(lines[2].starts_with("mistral:7b,"));
}

#[tokio::test]
async fn export_applies_filters_before_encoding() {
    let response = app()
        .oneshot(post_json(
            "/api/export",
            &export_body("json", json!({"capabilities": ["vision"]})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_models"], 1);
    assert_eq!(body["models"][0]["name"], "llava:13b");
    assert_eq!(body["filters_applied"]["capabilities"], json!(["vision"]));
}

#[tokio::test]
async fn export_clipboard_has_no_attachment() {
    let response = app()
        .oneshot(post_json("/api/export", &export_body("clipboard", json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let body = body_json(response).await;
    assert_eq!(body["total_models"], 2);
}

#[tokio::test]
async fn export_of_empty_view_is_rejected() {
    let response = app()
        .oneshot(post_json(
            "/api/export",
            &export_body("markdown", json!({"search": "no-such-model"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No models to export");
}
