//! Configuration module
//!
//! Settings structures, loading from TOML and environment, and validation.

pub mod settings;
pub mod validation;

pub use settings::{
    AuthConfig, DatabaseConfig, FeaturesConfig, LoggingConfig, RedisConfig, ServerConfig, Settings,
};
