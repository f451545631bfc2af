//! Filter evaluation over captured deliveries

use crate::error::Error;
use crate::store::CapturedRequest;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Conjunction of optional predicates applied by [`RequestStore::query`].
///
/// [`RequestStore::query`]: crate::store::RequestStore::query
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// Exact match on the owning endpoint.
    pub endpoint_id: Option<Uuid>,

    /// Exact match on the HTTP method.
    pub method: Option<String>,

    /// Substring match against the captured content type.
    pub content_type: Option<String>,

    /// Case-insensitive substring match against the body, the source
    /// address, or any header value.
    pub search: Option<String>,

    /// Inclusive lower bound on the capture timestamp.
    pub start: Option<DateTime<Utc>>,

    /// Exclusive upper bound on the capture timestamp.
    pub end: Option<DateTime<Utc>>,
}

/// How a search query interacts with the date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSemantics {
    /// A present search query decides the match on its own and the date
    /// window is skipped. This reproduces the dashboard's historical
    /// behavior and is the default.
    #[default]
    ShortCircuit,

    /// Every predicate applies, search query included.
    Conjunctive,
}

impl RequestFilter {
    /// Reject malformed combinations before evaluation.
    pub fn validate(&self) -> Result<(), Error> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(Error::InvalidFilter(format!(
                    "end {} precedes start {}",
                    end, start
                )));
            }
        }
        Ok(())
    }

    /// Evaluate this filter against a captured delivery.
    pub fn matches(&self, request: &CapturedRequest, semantics: FilterSemantics) -> bool {
        if let Some(endpoint_id) = self.endpoint_id {
            if request.endpoint_id != endpoint_id {
                return false;
            }
        }

        if let Some(method) = &self.method {
            if request.method != *method {
                return false;
            }
        }

        if let Some(content_type) = &self.content_type {
            if !request.content_type.contains(content_type.as_str()) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let query = search.to_lowercase();
            let hit = request.body.to_lowercase().contains(&query)
                || request.ip_address.to_lowercase().contains(&query)
                || request
                    .headers
                    .iter()
                    .any(|(_, value)| value.to_lowercase().contains(&query));

            match semantics {
                FilterSemantics::ShortCircuit => return hit,
                FilterSemantics::Conjunctive => {
                    if !hit {
                        return false;
                    }
                }
            }
        }

        if let Some(start) = self.start {
            if request.timestamp < start {
                return false;
            }
        }

        if let Some(end) = self.end {
            if request.timestamp >= end {
                return false;
            }
        }

        true
    }
}
