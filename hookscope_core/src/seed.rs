//! Demo fixtures loaded at startup: two endpoints and three captured
//! deliveries (GitHub, Stripe, Twilio), timestamped relative to the
//! inspector's clock.

use crate::inspector::Inspector;
use crate::registry::{capture_url, Endpoint};
use crate::store::CapturedRequest;
use chrono::Duration;
use uuid::Uuid;

const GITHUB_PUSH_BODY: &str = r#"{
  "ref": "refs/heads/main",
  "repository": {
    "name": "webhook-test",
    "full_name": "user/webhook-test"
  },
  "commits": [
    {
      "id": "abc123def456",
      "message": "Update README.md",
      "author": {
        "name": "John Doe",
        "email": "john@example.com"
      }
    }
  ]
}"#;

const STRIPE_EVENT_BODY: &str = r#"{
  "id": "evt_1234567890",
  "object": "event",
  "type": "payment_intent.succeeded",
  "data": {
    "object": {
      "id": "pi_1234567890",
      "amount": 2000,
      "currency": "usd",
      "status": "succeeded"
    }
  }
}"#;

const TWILIO_SMS_BODY: &str =
    "From=%2B1234567890&To=%2B0987654321&Body=Hello+World&MessageSid=SMxxxxxx";

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Load the demo dataset into the inspector.
///
/// The fixture endpoints keep their demo delivery counts, which do not
/// match the number of seeded captures; only deliveries ingested through
/// the boundary are counted exactly.
pub async fn seed_sample_data(inspector: &Inspector) {
    let now = inspector.now();
    let base_url = inspector.base_url();

    let github_endpoint_id = Uuid::new_v4();
    let twilio_endpoint_id = Uuid::new_v4();

    let endpoints = vec![
        Endpoint {
            id: github_endpoint_id,
            url: capture_url(base_url, &github_endpoint_id),
            created_at: now - Duration::hours(2),
            expires_at: now + Duration::minutes(58),
            request_count: 5,
            max_requests: Some(100),
            is_active: true,
        },
        Endpoint {
            id: twilio_endpoint_id,
            url: capture_url(base_url, &twilio_endpoint_id),
            created_at: now - Duration::minutes(30),
            expires_at: now + Duration::minutes(30),
            request_count: 12,
            max_requests: Some(50),
            is_active: true,
        },
    ];

    let requests = vec![
        CapturedRequest {
            id: Uuid::new_v4(),
            endpoint_id: github_endpoint_id,
            timestamp: now - Duration::minutes(10),
            method: "POST".to_string(),
            headers: pairs(&[
                ("Content-Type", "application/json"),
                ("User-Agent", "GitHub-Hookshot/abc123"),
                ("X-GitHub-Event", "push"),
                ("X-GitHub-Delivery", "def456"),
            ]),
            body: GITHUB_PUSH_BODY.to_string(),
            content_type: "application/json".to_string(),
            ip_address: "192.30.252.1".to_string(),
            user_agent: Some("GitHub-Hookshot/abc123".to_string()),
        },
        CapturedRequest {
            id: Uuid::new_v4(),
            endpoint_id: github_endpoint_id,
            timestamp: now - Duration::minutes(5),
            method: "POST".to_string(),
            headers: pairs(&[
                ("Content-Type", "application/json"),
                ("User-Agent", "Stripe/1.0"),
                ("Stripe-Signature", "v1=abc123def456"),
            ]),
            body: STRIPE_EVENT_BODY.to_string(),
            content_type: "application/json".to_string(),
            ip_address: "54.187.174.169".to_string(),
            user_agent: Some("Stripe/1.0".to_string()),
        },
        CapturedRequest {
            id: Uuid::new_v4(),
            endpoint_id: twilio_endpoint_id,
            timestamp: now - Duration::minutes(2),
            method: "POST".to_string(),
            headers: pairs(&[
                ("Content-Type", "application/x-www-form-urlencoded"),
                ("User-Agent", "Twilio/1.0"),
            ]),
            body: TWILIO_SMS_BODY.to_string(),
            content_type: "application/x-www-form-urlencoded".to_string(),
            ip_address: "54.172.60.0".to_string(),
            user_agent: Some("Twilio/1.0".to_string()),
        },
    ];

    inspector.load_fixtures(endpoints, requests).await;
}
