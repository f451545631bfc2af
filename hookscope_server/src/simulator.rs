//! Synthetic traffic generator
//!
//! Periodically ingests a fake delivery against a random eligible
//! endpoint so the dashboard has live data to show. Synthetic deliveries
//! go through the same ingestion path as real ones.

use chrono::{DateTime, Utc};
use hookscope_core::{Endpoint, Inspector, NewRequest};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

const METHODS: &[&str] = &["POST", "GET", "PUT", "PATCH"];

const CONTENT_TYPES: &[&str] = &[
    "application/json",
    "application/x-www-form-urlencoded",
    "text/plain",
];

/// Spawn the simulation loop.
pub fn spawn(inspector: Arc<Inspector>, interval_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            tick(&inspector).await;
        }
    })
}

/// One simulation cycle: pick a random active endpoint and ingest a
/// synthetic delivery against it. Does nothing when no endpoint is
/// eligible.
pub async fn tick(inspector: &Inspector) {
    let now = inspector.now();
    let endpoints = inspector.list_endpoints().await;

    let new = {
        let mut rng = rand::thread_rng();
        let candidates: Vec<&Endpoint> =
            endpoints.iter().filter(|e| e.accepts_at(now)).collect();
        match candidates.choose(&mut rng) {
            Some(endpoint) => synthetic_request(endpoint.id, now, &mut rng),
            None => return,
        }
    };

    match inspector.ingest(new).await {
        Ok(captured) => {
            tracing::debug!(
                "Simulated {} delivery to endpoint {}",
                captured.method,
                captured.endpoint_id
            );
        }
        // An endpoint can expire or hit its cap between the eligibility
        // snapshot and the ingest; the refusal is expected.
        Err(e) => tracing::debug!("Simulated delivery refused: {}", e),
    }
}

/// Build one synthetic delivery. The captured content type is always
/// JSON while the Content-Type header varies; the two fields are
/// independent on purpose.
fn synthetic_request(
    endpoint_id: Uuid,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> NewRequest {
    let method = METHODS[rng.gen_range(0..METHODS.len())];
    let header_content_type = CONTENT_TYPES[rng.gen_range(0..CONTENT_TYPES.len())];

    let body = format!(
        "{{\n  \"test\": true,\n  \"timestamp\": \"{}\",\n  \"data\": {{\n    \"message\": \"This is a simulated webhook request\",\n    \"random\": {}\n  }}\n}}",
        now.to_rfc3339(),
        rng.gen::<f64>()
    );

    NewRequest {
        endpoint_id,
        method: method.to_string(),
        headers: vec![
            ("Content-Type".to_string(), header_content_type.to_string()),
            ("User-Agent".to_string(), "TestClient/1.0".to_string()),
            ("X-Request-ID".to_string(), Uuid::new_v4().to_string()),
        ],
        body,
        content_type: "application/json".to_string(),
        ip_address: format!(
            "192.168.{}.{}",
            rng.gen_range(0..255),
            rng.gen_range(0..255)
        ),
        user_agent: Some("TestClient/1.0".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use hookscope_core::{ManualClock, RequestFilter};

    fn manual_inspector() -> (Arc<ManualClock>, Inspector) {
        let start = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let inspector = Inspector::with_clock("http://localhost:8080", clock.clone());
        (clock, inspector)
    }

    #[test]
    fn synthetic_request_draws_from_the_expected_pools() {
        let mut rng = rand::thread_rng();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let request = synthetic_request(Uuid::new_v4(), now, &mut rng);

        assert!(METHODS.contains(&request.method.as_str()));
        assert_eq!(request.content_type, "application/json");
        assert!(request.ip_address.starts_with("192.168."));
        assert_eq!(request.user_agent.as_deref(), Some("TestClient/1.0"));
        assert!(request.body.contains("simulated webhook request"));

        let header_ct = request
            .headers
            .iter()
            .find(|(k, _)| k == "Content-Type")
            .map(|(_, v)| v.as_str())
            .unwrap();
        assert!(CONTENT_TYPES.contains(&header_ct));
    }

    #[tokio::test]
    async fn tick_ingests_against_an_active_endpoint() {
        let (_, inspector) = manual_inspector();
        let endpoint = inspector.create_endpoint(60, None).await;

        tick(&inspector).await;

        let requests = inspector
            .list_requests(&RequestFilter::default())
            .await
            .unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint_id, endpoint.id);
        assert_eq!(
            inspector.get_endpoint(endpoint.id).await.unwrap().request_count,
            1
        );
    }

    #[tokio::test]
    async fn tick_skips_ineligible_endpoints() {
        let (clock, inspector) = manual_inspector();
        inspector.create_endpoint(30, None).await;
        clock.advance(ChronoDuration::minutes(30));

        tick(&inspector).await;

        assert!(inspector
            .list_requests(&RequestFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn tick_is_a_noop_with_no_endpoints() {
        let (_, inspector) = manual_inspector();
        tick(&inspector).await;
        assert_eq!(inspector.stats().await.total_requests, 0);
    }
}
