//! Rate limiting middleware
//!
//! Sliding-window limiter keyed on the caller's bearer token, applied to
//! the whole API router. State is in-process; every window allows a small
//! burst on top of the configured request budget.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::state::AppContext;
use crate::utils::errors::ThreadlineError;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 120,
            window_duration: Duration::from_secs(60),
            burst_allowance: 10,
        }
    }
}

/// Rate limit entry for tracking a caller's requests
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Clean up old requests outside the window
    fn cleanup(&mut self, window_duration: Duration) {
        let cutoff = Instant::now() - window_duration;
        self.requests.retain(|&time| time > cutoff);

        if self.last_reset.elapsed() > window_duration {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    /// Check if a request is allowed
    fn is_allowed(&mut self, config: &RateLimitConfig) -> bool {
        self.cleanup(config.window_duration);

        let current_requests = self.requests.len() as u32;

        if current_requests < config.max_requests {
            return true;
        }

        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    /// Record a new request
    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// Rate limiting middleware state
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    enabled: bool,
}

impl RateLimiter {
    /// Create a new RateLimiter instance
    pub fn new(config: RateLimitConfig, enabled: bool) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
            enabled,
        }
    }

    /// Build from application settings
    pub fn from_settings(settings: &Settings) -> Self {
        let config = RateLimitConfig {
            max_requests: settings.auth.rate_limit_per_minute,
            ..Default::default()
        };
        Self::new(config, settings.features.rate_limiting)
    }

    /// Check and record a request for a caller key
    pub fn check(&self, key: &str) -> Result<(), ThreadlineError> {
        if !self.enabled {
            return Ok(());
        }

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(key.to_string()).or_insert_with(RateLimitEntry::new);

        if !entry.is_allowed(&self.config) {
            warn!(key = %key, "Rate limit exceeded");
            return Err(ThreadlineError::RateLimitExceeded);
        }

        entry.record_request();
        debug!(key = %key, "Rate limit check passed");
        Ok(())
    }
}

/// Identify the caller: the bearer token when present, otherwise anonymous
fn caller_key(request: &Request) -> String {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|header| header.to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Axum middleware applying the limiter to every request
pub async fn rate_limit_middleware(
    State(ctx): State<AppContext>,
    request: Request,
    next: Next,
) -> Response {
    let key = caller_key(&request);

    if let Err(err) = ctx.rate_limiter.check(&key) {
        return err.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_limiter() -> RateLimiter {
        RateLimiter::new(
            RateLimitConfig {
                max_requests: 2,
                window_duration: Duration::from_secs(60),
                burst_allowance: 1,
            },
            true,
        )
    }

    #[test]
    fn allows_within_budget() {
        let limiter = tight_limiter();
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
    }

    #[test]
    fn burst_then_reject() {
        let limiter = tight_limiter();
        limiter.check("a").unwrap();
        limiter.check("a").unwrap();
        // Burst allowance admits one more.
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_err());
    }

    #[test]
    fn keys_are_independent() {
        let limiter = tight_limiter();
        for _ in 0..3 {
            limiter.check("a").unwrap();
        }
        assert!(limiter.check("a").is_err());
        assert!(limiter.check("b").is_ok());
    }

    #[test]
    fn disabled_limiter_never_rejects() {
        let limiter = RateLimiter::new(
            RateLimitConfig {
                max_requests: 1,
                window_duration: Duration::from_secs(60),
                burst_allowance: 0,
            },
            false,
        );
        for _ in 0..10 {
            assert!(limiter.check("a").is_ok());
        }
    }
}
