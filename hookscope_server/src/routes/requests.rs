//! Captured-request query and export API

use super::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use hookscope_core::{Error, RequestFilter};
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for listing captured requests
#[derive(Debug, Deserialize)]
pub struct RequestsQuery {
    pub endpoint_id: Option<Uuid>,
    pub method: Option<String>,
    pub content_type: Option<String>,
    pub search: Option<String>,
    /// RFC 3339, inclusive lower bound
    pub start: Option<DateTime<Utc>>,
    /// RFC 3339, exclusive upper bound
    pub end: Option<DateTime<Utc>>,
}

impl From<RequestsQuery> for RequestFilter {
    fn from(q: RequestsQuery) -> Self {
        RequestFilter {
            endpoint_id: q.endpoint_id,
            method: q.method,
            content_type: q.content_type,
            search: q.search,
            start: q.start,
            end: q.end,
        }
    }
}

/// List captured requests matching the filter, newest first
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestsQuery>,
) -> Response {
    let filter = RequestFilter::from(query);
    match state.inspector.list_requests(&filter).await {
        Ok(requests) => Json(requests).into_response(),
        Err(err @ Error::InvalidFilter(_)) => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

/// Get a single captured request by id
pub async fn get_request(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.inspector.get_request(id).await {
        Some(request) => Json(request).into_response(),
        None => (StatusCode::NOT_FOUND, "Request not found").into_response(),
    }
}

/// Download a captured request as a pretty-printed JSON attachment
pub async fn export_request(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let request = match state.inspector.get_request(id).await {
        Some(request) => request,
        None => return (StatusCode::NOT_FOUND, "Request not found").into_response(),
    };

    let body = match serde_json::to_string_pretty(&request) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize request {}: {}", id, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Serialization failed").into_response();
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"webhook-request-{}.json\"", id),
        )
        .body(Body::from(body))
        .unwrap()
}
