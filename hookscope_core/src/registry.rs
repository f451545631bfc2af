//! Endpoint registry - owns inspection endpoints and their lifecycle state

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A temporary inspection endpoint that accepts webhook deliveries until
/// it expires or hits its delivery cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: Uuid,

    /// Externally reachable capture URL, derived from the public base URL
    /// and the endpoint id.
    pub url: String,

    pub created_at: DateTime<Utc>,

    /// Instant at which the endpoint stops accepting deliveries.
    pub expires_at: DateTime<Utc>,

    /// Number of captured deliveries, monotonically increasing.
    pub request_count: u64,

    /// Optional delivery cap; once reached, further deliveries are refused
    /// even if the endpoint has not expired.
    pub max_requests: Option<u64>,

    /// When false the endpoint accepts nothing, regardless of time or count.
    pub is_active: bool,
}

/// Read-time classification of an endpoint. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointStatus {
    Active,
    Inactive,
    Expired,
    LimitReached,
}

impl EndpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::Active => "active",
            EndpointStatus::Inactive => "inactive",
            EndpointStatus::Expired => "expired",
            EndpointStatus::LimitReached => "limit_reached",
        }
    }
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Endpoint {
    /// Classify this endpoint at the given instant.
    ///
    /// Precedence: Inactive, then Expired, then LimitReached. An endpoint
    /// is Expired at any instant at or after `expires_at`.
    pub fn status_at(&self, now: DateTime<Utc>) -> EndpointStatus {
        if !self.is_active {
            return EndpointStatus::Inactive;
        }
        if now >= self.expires_at {
            return EndpointStatus::Expired;
        }
        if let Some(max) = self.max_requests {
            if self.request_count >= max {
                return EndpointStatus::LimitReached;
            }
        }
        EndpointStatus::Active
    }

    /// Whether the endpoint accepts deliveries at the given instant.
    pub fn accepts_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == EndpointStatus::Active
    }
}

/// Build the externally reachable capture URL for an endpoint.
pub fn capture_url(base_url: &str, id: &Uuid) -> String {
    format!("{}/hooks/{}/", base_url.trim_end_matches('/'), id)
}

/// Owns the set of inspection endpoints.
///
/// Methods take the current instant explicitly; the registry never reads
/// wall time itself. Eligibility of a delivery is the ingestion boundary's
/// concern, not the registry's.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self {
            endpoints: Vec::new(),
        }
    }

    /// Allocate a new endpoint expiring `ttl_minutes` from `now`.
    pub fn create(
        &mut self,
        now: DateTime<Utc>,
        base_url: &str,
        ttl_minutes: i64,
        max_requests: Option<u64>,
    ) -> Endpoint {
        let id = Uuid::new_v4();
        let endpoint = Endpoint {
            id,
            url: capture_url(base_url, &id),
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            request_count: 0,
            max_requests,
            is_active: true,
        };
        self.endpoints.insert(0, endpoint.clone());
        endpoint
    }

    /// Insert a prebuilt endpoint (used when loading fixtures).
    pub fn insert(&mut self, endpoint: Endpoint) {
        self.endpoints.insert(0, endpoint);
    }

    /// Remove an endpoint. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<Endpoint> {
        let idx = self.endpoints.iter().position(|e| e.id == id)?;
        Some(self.endpoints.remove(idx))
    }

    /// All endpoints, most recently created first.
    pub fn list(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn get(&self, id: Uuid) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    /// Count a captured delivery against the endpoint, if it exists.
    pub fn record_delivery(&mut self, id: Uuid) -> bool {
        match self.endpoints.iter_mut().find(|e| e.id == id) {
            Some(endpoint) => {
                endpoint.request_count += 1;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
