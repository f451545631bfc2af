//! Hookscope Server - webhook inspection service
//!
//! Exposes the inspection engine over HTTP:
//! - Temporary inspection endpoints with TTL and delivery caps
//! - Capture of inbound deliveries at `/hooks/{endpoint_id}/`, any method
//! - Filtered query, export, and stats API with a WebSocket live feed
//! - An embedded dashboard and a periodic traffic simulator for demos

pub mod config;
pub mod html;
pub mod routes;
pub mod simulator;
