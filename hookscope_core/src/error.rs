//! Error taxonomy for inspector operations

use crate::registry::EndpointStatus;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by inspector operations.
///
/// Every operation either succeeds or fails synchronously with one of
/// these; there is no partial failure and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The referenced endpoint does not exist.
    #[error("endpoint {id} not found")]
    EndpointNotFound { id: Uuid },

    /// Delivery refused because the endpoint no longer accepts requests.
    #[error("endpoint {id} is not accepting deliveries ({status})")]
    IneligibleEndpoint { id: Uuid, status: EndpointStatus },

    /// The filter combination is malformed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ineligible_error_names_the_status() {
        let err = Error::IneligibleEndpoint {
            id: Uuid::nil(),
            status: EndpointStatus::Expired,
        };
        assert!(err.to_string().contains("expired"));
    }
}
