//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, ThreadlineError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(ThreadlineError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(ThreadlineError::Config("Server port must be greater than 0".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ThreadlineError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(ThreadlineError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ThreadlineError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ThreadlineError::Config("Redis URL is required".to_string()));
    }

    if !config.url.starts_with("redis://") && !config.url.starts_with("rediss://") {
        return Err(ThreadlineError::Config(
            "Redis URL must start with redis:// or rediss://".to_string(),
        ));
    }

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(ThreadlineError::Config("JWT secret is required".to_string()));
    }

    if config.jwt_secret.len() < 32 {
        return Err(ThreadlineError::Config(
            "JWT secret must be at least 32 characters".to_string(),
        ));
    }

    if config.token_ttl_hours <= 0 {
        return Err(ThreadlineError::Config(
            "Token TTL must be greater than 0 hours".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ThreadlineError::Config("Logging level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    let base_level = config.level.split(',').next().unwrap_or(&config.level);
    if !valid_levels.contains(&base_level) && !base_level.contains('=') {
        return Err(ThreadlineError::Config(format!(
            "Invalid logging level: {}",
            config.level
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    #[test]
    fn default_with_secret_passes() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn missing_jwt_secret_fails() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn short_jwt_secret_fails() {
        let mut settings = valid_settings();
        settings.auth.jwt_secret = "short".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn inverted_connection_bounds_fail() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn bad_redis_scheme_fails() {
        let mut settings = valid_settings();
        settings.redis.url = "http://localhost:6379".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
