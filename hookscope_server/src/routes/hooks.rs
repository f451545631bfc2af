//! Public capture route - accepts webhook deliveries addressed to an
//! inspection endpoint, any method.

use super::AppState;
use axum::{
    body::Body,
    extract::{ConnectInfo, Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use hookscope_core::{Error, NewRequest};
use serde::Serialize;
use std::net::SocketAddr;
use uuid::Uuid;

/// Response for a captured delivery
#[derive(Debug, Serialize)]
struct CaptureResponse {
    status: String,
    request_id: Uuid,
}

/// Capture an inbound delivery.
///
/// Refused with 404 when the endpoint does not exist and 410 when its
/// derived status is no longer Active.
pub async fn capture(
    State(state): State<AppState>,
    Path(endpoint_id): Path<Uuid>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let (parts, body) = request.into_parts();

    let body_bytes = match axum::body::to_bytes(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Failed to read delivery body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read body").into_response();
        }
    };

    let headers: Vec<(String, String)> = parts
        .headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
        .collect();

    let content_type = parts
        .headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let user_agent = parts
        .headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    // Trust the proxy-provided source address when present, otherwise use
    // the socket peer.
    let ip_address = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| peer.ip().to_string());

    let new = NewRequest {
        endpoint_id,
        method: parts.method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body_bytes).into_owned(),
        content_type,
        ip_address,
        user_agent,
    };

    match state.inspector.ingest(new).await {
        Ok(captured) => {
            tracing::debug!(
                "Captured {} delivery {} for endpoint {}",
                captured.method,
                captured.id,
                endpoint_id
            );
            Json(CaptureResponse {
                status: "captured".to_string(),
                request_id: captured.id,
            })
            .into_response()
        }
        Err(err @ Error::EndpointNotFound { .. }) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err @ Error::IneligibleEndpoint { .. }) => {
            tracing::debug!("Delivery refused: {}", err);
            (StatusCode::GONE, err.to_string()).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}
