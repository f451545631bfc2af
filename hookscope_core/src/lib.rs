//! Hookscope Core - In-memory webhook inspection engine
//!
//! This crate owns the endpoint registry, the captured-request store, and
//! the [`Inspector`] facade that the HTTP layer drives. It performs no
//! I/O of its own; state lives for the lifetime of the process.

pub mod clock;
pub mod error;
pub mod filter;
pub mod inspector;
pub mod registry;
pub mod seed;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::Error;
pub use filter::{FilterSemantics, RequestFilter};
pub use inspector::{Inspector, InspectorEvent, InspectorStats};
pub use registry::{Endpoint, EndpointRegistry, EndpointStatus};
pub use store::{CapturedRequest, NewRequest, RequestStore};
