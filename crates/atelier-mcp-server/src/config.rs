//! Processor configuration.
//!
//! Every field defaults, so an empty configuration object deserializes to a
//! fully usable config: validation and request logging on, rate limiting off.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateLimitConfig {
    /// Whether the sliding-window limiter runs at all
    pub enabled: bool,
    /// Maximum requests per method within one window
    pub max_requests_per_minute: u32,
}

impl RateLimitConfig {
    /// The fixed sliding-window size
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(60)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_requests_per_minute: 60,
        }
    }
}

/// Configuration recognized by the request processor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Run per-method params validation before invoking a handler
    pub validate_requests: bool,
    /// Emit structured logs for each request lifecycle step
    pub log_requests: bool,
    pub rate_limiting: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            validate_requests: true,
            log_requests: true,
            rate_limiting: RateLimitConfig::default(),
        }
    }
}
