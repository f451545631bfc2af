//! Inspector facade - composes the endpoint registry and the request
//! store behind a single lock and broadcasts capture events.
//!
//! All mutation goes through the write lock, so an endpoint's
//! `request_count` always equals the number of stored captures addressed
//! to it, even under concurrent ingestion.

use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::filter::{FilterSemantics, RequestFilter};
use crate::registry::{Endpoint, EndpointRegistry, EndpointStatus};
use crate::store::{CapturedRequest, NewRequest, RequestStore};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Event channel capacity; slow subscribers miss events rather than
/// blocking captures.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Summary statistics, recomputed from live state on every call.
#[derive(Debug, Clone, Serialize)]
pub struct InspectorStats {
    pub total_endpoints: usize,
    pub active_endpoints: usize,
    pub total_requests: usize,
    pub requests_today: usize,
}

/// Events broadcast to live subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum InspectorEvent {
    #[serde(rename = "request")]
    RequestCaptured(CapturedRequest),
    #[serde(rename = "endpoint_removed")]
    EndpointRemoved { id: Uuid },
}

struct InspectorState {
    registry: EndpointRegistry,
    store: RequestStore,
}

/// Owns all inspection state for one deployment.
pub struct Inspector {
    state: RwLock<InspectorState>,
    clock: Arc<dyn Clock>,
    base_url: String,
    semantics: FilterSemantics,
    events: broadcast::Sender<InspectorEvent>,
}

impl Inspector {
    /// Inspector on the system clock. `base_url` is the public base from
    /// which endpoint capture URLs are derived.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_clock(base_url, Arc::new(SystemClock))
    }

    pub fn with_clock(base_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(InspectorState {
                registry: EndpointRegistry::new(),
                store: RequestStore::new(),
            }),
            clock,
            base_url: base_url.into(),
            semantics: FilterSemantics::default(),
            events,
        }
    }

    /// Choose how a search query interacts with the date window.
    pub fn with_filter_semantics(mut self, semantics: FilterSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    /// Current instant on the inspector's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Public base URL from which capture URLs are derived.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an endpoint expiring `ttl_minutes` from now.
    pub async fn create_endpoint(
        &self,
        ttl_minutes: i64,
        max_requests: Option<u64>,
    ) -> Endpoint {
        let now = self.clock.now();
        let mut state = self.state.write().await;
        state
            .registry
            .create(now, &self.base_url, ttl_minutes, max_requests)
    }

    /// All endpoints, most recently created first.
    pub async fn list_endpoints(&self) -> Vec<Endpoint> {
        self.state.read().await.registry.list().to_vec()
    }

    pub async fn get_endpoint(&self, id: Uuid) -> Option<Endpoint> {
        self.state.read().await.registry.get(id).cloned()
    }

    /// Delete an endpoint and every capture addressed to it. Deleting an
    /// unknown id is a no-op.
    pub async fn delete_endpoint(&self, id: Uuid) {
        let mut state = self.state.write().await;
        if state.registry.remove(id).is_some() {
            state.store.remove_by_endpoint(id);
            let _ = self.events.send(InspectorEvent::EndpointRemoved { id });
        }
    }

    /// Capture a delivery.
    ///
    /// Refused unless the target endpoint's derived status is Active at
    /// the moment of ingestion; the count increment and the append happen
    /// under one write lock.
    pub async fn ingest(&self, new: NewRequest) -> Result<CapturedRequest, Error> {
        let now = self.clock.now();
        let mut state = self.state.write().await;

        let endpoint = state
            .registry
            .get(new.endpoint_id)
            .ok_or(Error::EndpointNotFound {
                id: new.endpoint_id,
            })?;
        let status = endpoint.status_at(now);
        if status != EndpointStatus::Active {
            return Err(Error::IneligibleEndpoint {
                id: new.endpoint_id,
                status,
            });
        }

        let request = CapturedRequest {
            id: Uuid::new_v4(),
            endpoint_id: new.endpoint_id,
            timestamp: now,
            method: new.method,
            headers: new.headers,
            body: new.body,
            content_type: new.content_type,
            ip_address: new.ip_address,
            user_agent: new.user_agent,
        };

        state.registry.record_delivery(new.endpoint_id);
        state.store.insert(request.clone());

        let _ = self
            .events
            .send(InspectorEvent::RequestCaptured(request.clone()));

        Ok(request)
    }

    /// Captures matching the filter, newest first. Validates the filter
    /// before evaluating it.
    pub async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<CapturedRequest>, Error> {
        filter.validate()?;
        Ok(self.state.read().await.store.query(filter, self.semantics))
    }

    pub async fn get_request(&self, id: Uuid) -> Option<CapturedRequest> {
        self.state.read().await.store.get(id).cloned()
    }

    /// Summary statistics. `active_endpoints` applies the full status
    /// precedence and `requests_today` counts captures in the local
    /// calendar day, both evaluated fresh at call time.
    pub async fn stats(&self) -> InspectorStats {
        let now = self.clock.now();
        let state = self.state.read().await;
        let today = now.with_timezone(&Local).date_naive();

        InspectorStats {
            total_endpoints: state.registry.len(),
            active_endpoints: state
                .registry
                .list()
                .iter()
                .filter(|e| e.status_at(now) == EndpointStatus::Active)
                .count(),
            total_requests: state.store.len(),
            requests_today: state
                .store
                .all()
                .iter()
                .filter(|r| r.timestamp.with_timezone(&Local).date_naive() == today)
                .count(),
        }
    }

    /// Subscribe to capture events.
    pub fn subscribe(&self) -> broadcast::Receiver<InspectorEvent> {
        self.events.subscribe()
    }

    /// Load prebuilt fixtures, bypassing ingestion checks. Fixture
    /// endpoints keep whatever `request_count` they carry.
    pub async fn load_fixtures(
        &self,
        endpoints: Vec<Endpoint>,
        requests: Vec<CapturedRequest>,
    ) {
        let mut state = self.state.write().await;
        for endpoint in endpoints {
            state.registry.insert(endpoint);
        }
        for request in requests {
            state.store.insert(request);
        }
    }
}
