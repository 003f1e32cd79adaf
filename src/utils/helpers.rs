//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use crate::utils::errors::{Result, ThreadlineError};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        format!("{}...", &text[..max_length.saturating_sub(3)])
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.len() >= 10
}

/// Require a non-empty trimmed string field
pub fn require_field(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ThreadlineError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Require that an end timestamp does not precede its start
pub fn require_ordered(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    start_field: &str,
    end_field: &str,
) -> Result<()> {
    if end < start {
        return Err(ThreadlineError::InvalidInput(format!(
            "{} must not be before {}",
            end_field, start_field
        )));
    }
    Ok(())
}

/// Generate an uppercase alphanumeric confirmation code
pub fn generate_confirmation_code(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Calculate pagination offset
pub fn calculate_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1) * page_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("sales@threadline.example"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two words@threadline.example"));
    }

    #[test]
    fn required_field_rejects_blank() {
        assert!(require_field("  ", "name").is_err());
        assert!(require_field("Ava", "name").is_ok());
    }

    #[test]
    fn ordered_dates() {
        let start = Utc::now();
        let end = start + Duration::hours(2);
        assert!(require_ordered(start, end, "starts_at", "ends_at").is_ok());
        assert!(require_ordered(end, start, "starts_at", "ends_at").is_err());
    }

    #[test]
    fn confirmation_code_shape() {
        let code = generate_confirmation_code(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(code, code.to_uppercase());
    }

    #[test]
    fn pagination_offset() {
        assert_eq!(calculate_offset(1, 50), 0);
        assert_eq!(calculate_offset(3, 20), 40);
        assert_eq!(calculate_offset(0, 20), 0);
    }
}
