//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Threadline application.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "threadline.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log lead progress changes
pub fn log_lead_progress(lead_id: i64, user_id: i64, step: &str, value: bool) {
    info!(
        lead_id = lead_id,
        user_id = user_id,
        step = step,
        value = value,
        "Lead progress updated"
    );
}

/// Log order status changes
pub fn log_order_status(order_id: i64, stage: &str, user_id: i64, details: Option<&str>) {
    info!(
        order_id = order_id,
        stage = stage,
        user_id = user_id,
        details = details,
        "Order status recorded"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}
