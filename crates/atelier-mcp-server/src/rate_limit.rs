//! Sliding-window request rate limiting.
//!
//! One window per key (the method name in the default policy, so all clients
//! share a quota per method). The limiter is owned by the processor instance
//! that constructed it; there is no global state to reset between tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use tracing::debug;

use crate::config::RateLimitConfig;
use crate::error::{McpError, McpResult};

/// Evict expired windows once every this many checks
const EVICTION_INTERVAL: u64 = 64;

#[derive(Debug)]
struct Window {
    count: u32,
    window_start: Instant,
}

/// Per-key sliding-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
    checks: AtomicU64,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
            checks: AtomicU64::new(0),
        }
    }

    /// Check the quota for `key` and consume one slot.
    ///
    /// A fresh or expired window starts at count 1 and allows the call.
    /// Within a live window the count saturates at the limit, so repeated
    /// rejections never overflow it and the limit check stays monotonic.
    /// When disabled, every call is allowed and no state is touched.
    pub fn check_and_consume(&self, key: &str) -> McpResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let window_duration = self.config.window_duration();
        let max_requests = self.config.max_requests_per_minute;
        let now = Instant::now();

        let mut windows = self.windows.lock().expect("rate limit lock poisoned");

        // Opportunistic housekeeping instead of a scheduled sweep
        if self.checks.fetch_add(1, Ordering::Relaxed) % EVICTION_INTERVAL == EVICTION_INTERVAL - 1
        {
            windows.retain(|_, w| now.duration_since(w.window_start) < window_duration);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            window_start: now,
        });

        if now.duration_since(window.window_start) >= window_duration {
            window.count = 1;
            window.window_start = now;
            return Ok(());
        }

        window.count = window
            .count
            .saturating_add(1)
            .min(max_requests.saturating_add(1));
        if window.count > max_requests {
            debug!(key, count = window.count, "rate limit exceeded");
            return Err(McpError::RateLimited(key.to_string()));
        }

        Ok(())
    }

    /// Number of live windows, for introspection
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().expect("rate limit lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(enabled: bool, max: u32) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            enabled,
            max_requests_per_minute: max,
        })
    }

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = limiter(true, 3);
        assert!(limiter.check_and_consume("tools/call").is_ok());
        assert!(limiter.check_and_consume("tools/call").is_ok());
        assert!(limiter.check_and_consume("tools/call").is_ok());
        assert!(limiter.check_and_consume("tools/call").is_err());
    }

    #[test]
    fn test_second_call_rejected_with_limit_one() {
        let limiter = limiter(true, 1);
        assert!(limiter.check_and_consume("ping").is_ok());
        let error = limiter.check_and_consume("ping").unwrap_err();
        assert!(matches!(error, McpError::RateLimited(ref key) if key == "ping"));
    }

    #[test]
    fn test_keys_have_independent_windows() {
        let limiter = limiter(true, 1);
        assert!(limiter.check_and_consume("tools/call").is_ok());
        assert!(limiter.check_and_consume("resources/read").is_ok());
        assert!(limiter.check_and_consume("tools/call").is_err());
    }

    #[test]
    fn test_disabled_allows_everything_and_keeps_no_state() {
        let limiter = limiter(false, 1);
        for _ in 0..100 {
            assert!(limiter.check_and_consume("ping").is_ok());
        }
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn test_rejections_saturate_count() {
        let limiter = limiter(true, 2);
        for _ in 0..50 {
            let _ = limiter.check_and_consume("tools/call");
        }
        // Still exactly one tracked window, still rejecting
        assert_eq!(limiter.tracked_keys(), 1);
        assert!(limiter.check_and_consume("tools/call").is_err());
    }
}
