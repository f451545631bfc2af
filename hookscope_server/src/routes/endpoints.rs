//! Endpoint management API

use super::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use hookscope_core::{Endpoint, EndpointStatus, InspectorStats};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create an inspection endpoint
#[derive(Debug, Deserialize)]
pub struct CreateEndpointRequest {
    /// Minutes until the endpoint expires
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Optional cap on captured deliveries
    pub max_requests: Option<u64>,
}

fn default_ttl_minutes() -> i64 {
    60
}

/// Endpoint plus its derived status at response time
#[derive(Debug, Serialize)]
pub struct EndpointView {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    pub status: EndpointStatus,
}

impl EndpointView {
    fn at(endpoint: Endpoint, now: chrono::DateTime<chrono::Utc>) -> Self {
        let status = endpoint.status_at(now);
        Self { endpoint, status }
    }
}

/// List all endpoints, newest first
pub async fn list_endpoints(State(state): State<AppState>) -> Json<Vec<EndpointView>> {
    let now = state.inspector.now();
    let views = state
        .inspector
        .list_endpoints()
        .await
        .into_iter()
        .map(|e| EndpointView::at(e, now))
        .collect();
    Json(views)
}

/// Create a new inspection endpoint
pub async fn create_endpoint(
    State(state): State<AppState>,
    Json(req): Json<CreateEndpointRequest>,
) -> impl IntoResponse {
    let endpoint = state
        .inspector
        .create_endpoint(req.ttl_minutes, req.max_requests)
        .await;
    tracing::info!("Created endpoint {} (ttl {}m)", endpoint.id, req.ttl_minutes);

    let now = state.inspector.now();
    (StatusCode::CREATED, Json(EndpointView::at(endpoint, now)))
}

/// Delete an endpoint and all of its captured requests
pub async fn delete_endpoint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state.inspector.delete_endpoint(id).await;
    tracing::info!("Deleted endpoint {}", id);
    StatusCode::NO_CONTENT
}

/// Summary statistics, recomputed on every call
pub async fn get_stats(State(state): State<AppState>) -> Json<InspectorStats> {
    Json(state.inspector.stats().await)
}
