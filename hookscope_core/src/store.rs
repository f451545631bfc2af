//! Captured-delivery storage and filtered retrieval

use crate::filter::{FilterSemantics, RequestFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One captured inbound delivery addressed to an endpoint.
///
/// Immutable once stored; removed only when the owning endpoint is
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedRequest {
    pub id: Uuid,

    /// Owning endpoint's id. A referential link only - the registry does
    /// not hold requests.
    pub endpoint_id: Uuid,

    pub timestamp: DateTime<Utc>,

    pub method: String,

    /// Header pairs as they arrived, case and order preserved.
    pub headers: Vec<(String, String)>,

    /// Raw payload text.
    pub body: String,

    /// MIME type captured at the boundary; may diverge from the
    /// Content-Type header value.
    pub content_type: String,

    pub ip_address: String,

    pub user_agent: Option<String>,
}

impl CapturedRequest {
    /// First value of the named header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A delivery as it arrives at the ingestion boundary, before the store
/// assigns it an id and a timestamp.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub endpoint_id: Uuid,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub content_type: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
}

/// Owns the captured deliveries for all endpoints.
#[derive(Debug, Default)]
pub struct RequestStore {
    requests: Vec<CapturedRequest>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Append a capture. Endpoint eligibility is checked at the ingestion
    /// boundary, not here.
    pub fn insert(&mut self, request: CapturedRequest) {
        self.requests.push(request);
    }

    /// Captures matching the filter, newest first.
    pub fn query(
        &self,
        filter: &RequestFilter,
        semantics: FilterSemantics,
    ) -> Vec<CapturedRequest> {
        let mut matches: Vec<CapturedRequest> = self
            .requests
            .iter()
            .filter(|r| filter.matches(r, semantics))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matches
    }

    pub fn get(&self, id: Uuid) -> Option<&CapturedRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Drop every capture addressed to the endpoint; returns how many
    /// were removed.
    pub fn remove_by_endpoint(&mut self, endpoint_id: Uuid) -> usize {
        let before = self.requests.len();
        self.requests.retain(|r| r.endpoint_id != endpoint_id);
        before - self.requests.len()
    }

    pub fn all(&self) -> &[CapturedRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
