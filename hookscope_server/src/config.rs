//! Server configuration loaded from environment variables

use hookscope_core::FilterSemantics;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Port for the HTTP API and capture routes
    pub port: u16,

    /// Public base URL from which endpoint capture URLs are derived
    /// (e.g. "https://hooks.example.com")
    pub public_url: String,

    /// Seconds between synthetic deliveries; 0 disables the simulator
    pub simulate_interval_secs: u64,

    /// Load the demo dataset at startup
    pub seed_sample_data: bool,

    /// How a search query interacts with date-window filters
    pub filter_semantics: FilterSemantics,

    /// Maximum accepted delivery body size in bytes
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            simulate_interval_secs: env::var("SIMULATE_INTERVAL_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("SIMULATE_INTERVAL_SECS"))?,
            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            filter_semantics: match env::var("FILTER_SEMANTICS").ok().as_deref() {
                None | Some("short-circuit") | Some("short_circuit") => {
                    FilterSemantics::ShortCircuit
                }
                Some("conjunctive") => FilterSemantics::Conjunctive,
                Some(other) => {
                    return Err(ConfigError::InvalidFilterSemantics(other.to_string()))
                }
            },
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| (1024 * 1024).to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("MAX_BODY_BYTES"))?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_url: "http://localhost:8080".to_string(),
            simulate_interval_secs: 10,
            seed_sample_data: true,
            filter_semantics: FilterSemantics::ShortCircuit,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid numeric value for {0}")]
    InvalidNumber(&'static str),

    #[error("Unknown FILTER_SEMANTICS value: {0} (expected short-circuit or conjunctive)")]
    InvalidFilterSemantics(String),
}
