//! Threadline
//!
//! Business operations service for an apparel manufacturing company.
//! This library provides modular components for lead tracking, order and
//! manufacturing status management, design jobs, camp registrations, rosters,
//! travel logistics, internal mail, and role-based navigation.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflow;

// Re-export commonly used types
pub use config::Settings;
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::AppContext;
pub use utils::errors::{Result, ThreadlineError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
