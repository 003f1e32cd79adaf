//! Application-wide shared state

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::rate_limit::RateLimiter;
use crate::services::ServiceFactory;

/// Application context handed to every request handler
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub database: Arc<DatabaseService>,
    pub services: Arc<ServiceFactory>,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    /// Create a new AppContext from settings and the database service
    pub fn new(
        settings: Settings,
        database: DatabaseService,
        services: ServiceFactory,
    ) -> Self {
        let rate_limiter = RateLimiter::from_settings(&settings);

        Self {
            settings,
            database: Arc::new(database),
            services: Arc::new(services),
            rate_limiter,
        }
    }
}
