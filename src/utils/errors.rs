//! Error handling for Threadline
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the Threadline application
#[derive(Error, Debug)]
pub enum ThreadlineError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Lead not found: {lead_id}")]
    LeadNotFound { lead_id: i64 },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: i64 },

    #[error("Camp not found: {camp_id}")]
    CampNotFound { camp_id: i64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Message not found: {message_id}")]
    MessageNotFound { message_id: uuid::Uuid },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Capacity exceeded: camp {camp_id} is full ({capacity} seats)")]
    CapacityExceeded { camp_id: i64, capacity: i32 },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for Threadline operations
pub type Result<T> = std::result::Result<T, ThreadlineError>;

impl ThreadlineError {
    /// HTTP status code this error maps to at the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            ThreadlineError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            ThreadlineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ThreadlineError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ThreadlineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ThreadlineError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ThreadlineError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            ThreadlineError::LeadNotFound { .. } => StatusCode::NOT_FOUND,
            ThreadlineError::OrderNotFound { .. } => StatusCode::NOT_FOUND,
            ThreadlineError::CampNotFound { .. } => StatusCode::NOT_FOUND,
            ThreadlineError::NotFound { .. } => StatusCode::NOT_FOUND,
            ThreadlineError::MessageNotFound { .. } => StatusCode::NOT_FOUND,
            ThreadlineError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
            ThreadlineError::CapacityExceeded { .. } => StatusCode::CONFLICT,
            ThreadlineError::Redis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ThreadlineError::Serialization(_) => StatusCode::BAD_REQUEST,
            ThreadlineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ThreadlineError::Token(_) => StatusCode::UNAUTHORIZED,
            ThreadlineError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ThreadlineError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ThreadlineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ThreadlineError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ThreadlineError::Database(_) => ErrorSeverity::Critical,
            ThreadlineError::Migration(_) => ErrorSeverity::Critical,
            ThreadlineError::Config(_) => ErrorSeverity::Critical,
            ThreadlineError::PermissionDenied(_) => ErrorSeverity::Warning,
            ThreadlineError::Authentication(_) => ErrorSeverity::Warning,
            ThreadlineError::Token(_) => ErrorSeverity::Warning,
            ThreadlineError::RateLimitExceeded => ErrorSeverity::Warning,
            ThreadlineError::InvalidInput(_) => ErrorSeverity::Info,
            ThreadlineError::InvalidStateTransition { .. } => ErrorSeverity::Info,
            ThreadlineError::CapacityExceeded { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl IntoResponse for ThreadlineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %message, "Request failed")
            }
            ErrorSeverity::Warning => tracing::warn!(error = %message, "Request rejected"),
            ErrorSeverity::Info => tracing::debug!(error = %message, "Request rejected"),
        }

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ThreadlineError::LeadNotFound { lead_id: 7 };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn state_transition_maps_to_conflict() {
        let err = ThreadlineError::InvalidStateTransition {
            from: "in_production".to_string(),
            to: "ready_to_ship".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn invalid_input_maps_to_422() {
        let err = ThreadlineError::InvalidInput("email is required".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
