//! Middleware module
//!
//! Authentication extraction and rate limiting for the API router.

pub mod auth;
pub mod rate_limit;

pub use auth::AuthUser;
pub use rate_limit::{rate_limit_middleware, RateLimitConfig, RateLimiter};
