//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::error::HttpError;
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix; nested by [`create_router`].
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/fetch", post(handlers::fetch::fetch))
        .route("/export", post(handlers::export::export))
}

/// Create the main Axum router.
///
/// `/health` sits outside the CORS layer. Unknown paths answer with a JSON
/// 404 body.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(handlers::health::check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> HttpError {
    HttpError::NotFound("Not found".to_string())
}
