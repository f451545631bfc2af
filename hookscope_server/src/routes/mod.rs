//! Route handlers for the hookscope server

pub mod endpoints;
pub mod hooks;
pub mod requests;
pub mod ws;

use crate::config::Config;
use crate::html::DASHBOARD_HTML;
use axum::{
    extract::State,
    response::Html,
    routing::{any, get},
    Json, Router,
};
use hookscope_core::Inspector;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub inspector: Arc<Inspector>,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(serve_dashboard))
        // Health check
        .route("/api/health", get(health_check))
        // Endpoint management
        .route(
            "/api/endpoints",
            get(endpoints::list_endpoints).post(endpoints::create_endpoint),
        )
        .route("/api/endpoints/{id}", axum::routing::delete(endpoints::delete_endpoint))
        .route("/api/stats", get(endpoints::get_stats))
        // Captured requests
        .route("/api/requests", get(requests::list_requests))
        .route("/api/requests/{id}", get(requests::get_request))
        .route("/api/requests/{id}/export", get(requests::export_request))
        // Public capture routes (any method)
        .route("/hooks/{endpoint_id}", any(hooks::capture))
        .route("/hooks/{endpoint_id}/", any(hooks::capture))
        // WebSocket
        .route("/ws", get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the HTML dashboard
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    service: String,
    version: String,
    endpoints: usize,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let endpoints = state.inspector.list_endpoints().await;
    Json(HealthResponse {
        service: "hookscope".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: endpoints.len(),
    })
}
