//! End-to-end tests driving the router without a network listener.

use axum::body::Body;
use axum::extract::connect_info::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use hookscope_core::{seed, Inspector, ManualClock};
use hookscope_server::config::Config;
use hookscope_server::routes::{self, AppState};
use http_body_util::BodyExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(inspector: Arc<Inspector>) -> Router {
    let state = AppState {
        config: Arc::new(Config::default()),
        inspector,
    };
    routes::router(state)
}

fn manual_app() -> (Arc<ManualClock>, Arc<Inspector>, Router) {
    let start = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let inspector = Arc::new(Inspector::with_clock("http://localhost:8080", clock.clone()));
    let app = test_app(inspector.clone());
    (clock, inspector, app)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Capture routes read the socket peer; oneshot has no connection, so the
/// extension is provided by hand.
fn with_peer(mut request: Request<Body>) -> Request<Body> {
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 9], 4000))));
    request
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_check_reports_the_service() {
    let (_, _, app) = manual_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["service"], "hookscope");
    assert_eq!(json["endpoints"], 0);
}

#[tokio::test]
async fn seed_scenario_over_the_api() {
    let inspector = Arc::new(Inspector::new("http://localhost:8080"));
    seed::seed_sample_data(&inspector).await;
    let app = test_app(inspector);

    let response = app.clone().oneshot(get("/api/endpoints")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let endpoints = body_json(response).await;
    assert_eq!(endpoints.as_array().unwrap().len(), 2);
    for endpoint in endpoints.as_array().unwrap() {
        assert_eq!(endpoint["status"], "active");
    }

    let response = app.clone().oneshot(get("/api/requests")).await.unwrap();
    let requests = body_json(response).await;
    assert_eq!(requests.as_array().unwrap().len(), 3);

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["total_requests"], 3);
    assert_eq!(stats["total_endpoints"], 2);
}

#[tokio::test]
async fn create_and_delete_endpoint() {
    let (_, _, app) = manual_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/endpoints")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"ttl_minutes": 30, "max_requests": 5}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let endpoint = body_json(response).await;
    assert_eq!(endpoint["status"], "active");
    assert_eq!(endpoint["request_count"], 0);
    assert_eq!(endpoint["max_requests"], 5);
    let id = endpoint["id"].as_str().unwrap().to_string();
    assert!(endpoint["url"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/hooks/{}/", id)));

    let delete = |app: Router, id: String| async move {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/endpoints/{}", id))
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    };

    let response = delete(app.clone(), id.clone()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Second delete is a no-op, not an error.
    let response = delete(app.clone(), id).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/endpoints")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn capture_and_query_a_delivery() {
    let (_, inspector, app) = manual_app();
    let endpoint = inspector.create_endpoint(60, None).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/hooks/{}/", endpoint.id))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "GitHub-Hookshot/abc123")
        .header("X-Forwarded-For", "198.51.100.7, 10.0.0.1")
        .header("X-GitHub-Event", "push")
        .body(Body::from(r#"{"ref": "refs/heads/main"}"#))
        .unwrap();
    let response = app.clone().oneshot(with_peer(request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let capture = body_json(response).await;
    assert_eq!(capture["status"], "captured");
    let request_id = capture["request_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get("/api/requests?method=POST"))
        .await
        .unwrap();
    let requests = body_json(response).await;
    let requests = requests.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["id"].as_str().unwrap(), request_id);
    // First hop of X-Forwarded-For wins over the socket peer.
    assert_eq!(requests[0]["ip_address"], "198.51.100.7");
    assert_eq!(requests[0]["content_type"], "application/json");
    assert_eq!(requests[0]["user_agent"], "GitHub-Hookshot/abc123");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/requests/{}", request_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A miss on the method filter returns an empty list.
    let response = app
        .oneshot(get("/api/requests?method=DELETE"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn capture_uses_socket_peer_without_forwarded_header() {
    let (_, inspector, app) = manual_app();
    let endpoint = inspector.create_endpoint(60, None).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/hooks/{}", endpoint.id))
        .body(Body::from("payload"))
        .unwrap();
    let response = app.clone().oneshot(with_peer(request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/requests")).await.unwrap();
    let requests = body_json(response).await;
    assert_eq!(requests[0]["ip_address"], "203.0.113.9");
    // No Content-Type header was sent; the boundary default applies.
    assert_eq!(requests[0]["content_type"], "application/octet-stream");
}

#[tokio::test]
async fn capture_rejects_unknown_and_expired_endpoints() {
    let (clock, inspector, app) = manual_app();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/hooks/{}/", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(with_peer(request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let endpoint = inspector.create_endpoint(5, None).await;
    clock.advance(Duration::minutes(5));

    let request = Request::builder()
        .method("POST")
        .uri(format!("/hooks/{}/", endpoint.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(with_peer(request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::GONE);

    // The refusal left nothing behind.
    let response = app.oneshot(get("/api/requests")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn capture_rejects_endpoint_over_its_limit() {
    let (_, inspector, app) = manual_app();
    let endpoint = inspector.create_endpoint(60, Some(1)).await;

    let post = |app: Router| {
        let uri = format!("/hooks/{}/", endpoint.id);
        async move {
            let request = Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::from("x"))
                .unwrap();
            app.oneshot(with_peer(request)).await.unwrap()
        }
    };

    assert_eq!(post(app.clone()).await.status(), StatusCode::OK);
    assert_eq!(post(app.clone()).await.status(), StatusCode::GONE);

    let response = app.oneshot(get("/api/endpoints")).await.unwrap();
    let endpoints = body_json(response).await;
    assert_eq!(endpoints[0]["status"], "limit_reached");
    assert_eq!(endpoints[0]["request_count"], 1);
}

#[tokio::test]
async fn list_requests_rejects_an_inverted_date_range() {
    let (_, _, app) = manual_app();

    let response = app
        .oneshot(get(
            "/api/requests?start=2025-06-15T12:00:00Z&end=2025-06-15T11:00:00Z",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_request_id_is_not_found() {
    let (_, _, app) = manual_app();

    let uri = format!("/api/requests/{}", uuid::Uuid::new_v4());
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_sets_attachment_headers() {
    let inspector = Arc::new(Inspector::new("http://localhost:8080"));
    seed::seed_sample_data(&inspector).await;
    let app = test_app(inspector.clone());

    let requests = inspector
        .list_requests(&hookscope_core::RequestFilter::default())
        .await
        .unwrap();
    let id = requests[0].id;

    let response = app
        .oneshot(get(&format!("/api/requests/{}/export", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        disposition,
        format!("attachment; filename=\"webhook-request-{}.json\"", id)
    );

    let exported = body_json(response).await;
    assert_eq!(exported["id"].as_str().unwrap(), id.to_string());
}

#[tokio::test]
async fn dashboard_is_served_at_the_root() {
    let (_, _, app) = manual_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Hookscope"));
}
