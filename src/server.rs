use axum::{http::HeaderValue, middleware, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::cms::DocumentStore;
use crate::handlers;
use crate::middleware::principal_middleware;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Principal-aware API
        .merge(api_routes(state))
        // Global middleware
        .layer(cors_layer());

    if crate::config::config().api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/access", get(handlers::access_get_all))
        .route("/api/access/:collection", get(handlers::access_get))
        .route(
            "/api/:collection",
            get(handlers::collection_get).post(handlers::collection_post),
        )
        .layer(middleware::from_fn(principal_middleware))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = crate::config::config()
        .security
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Komodo Portal API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "access": "/api/access[/:collection] (caller's permissions)",
                "collections": "/api/:collection (role-gated list, search and create)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
