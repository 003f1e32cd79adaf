//! Shared test infrastructure
//!
//! Spins up containerized PostgreSQL and Redis (or uses TEST_DATABASE_URL /
//! TEST_REDIS_URL when provided), applies migrations, and builds the full
//! service stack the way main.rs does.

pub mod database_helper;
pub mod test_data;

#[allow(unused_imports)]
pub use test_data::*;

use std::sync::Once;

use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::redis::Redis as RedisImage;

use threadline::config::Settings;
use threadline::database::DatabaseService;
use threadline::services::ServiceFactory;
use threadline::state::AppContext;

use database_helper::TestDatabase;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });
}

/// Full application stack against throwaway backing stores
pub struct TestContext {
    pub db: TestDatabase,
    pub settings: Settings,
    pub services: ServiceFactory,
    pub state: AppContext,
    _redis_container: Option<ContainerAsync<RedisImage>>,
}

impl TestContext {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        init_test_logging();

        let db = TestDatabase::new().await?;

        let (redis_url, redis_container) = if let Ok(url) = std::env::var("TEST_REDIS_URL") {
            (url, None)
        } else {
            let container = RedisImage::default().start().await?;
            let port = container.get_host_port_ipv4(6379).await?;
            (format!("redis://localhost:{}", port), Some(container))
        };

        let mut settings = Settings::default();
        settings.auth.jwt_secret = "test-secret-test-secret-test-secret!".to_string();
        settings.database.url = db.database_url.clone();
        settings.redis.url = redis_url;

        let database_service = DatabaseService::new(db.pool.clone());
        let services = ServiceFactory::new(settings.clone(), &database_service)?;
        let state = AppContext::new(settings.clone(), database_service, services.clone());

        Ok(Self {
            db,
            settings,
            services,
            state,
            _redis_container: redis_container,
        })
    }

    /// Remove all rows between tests sharing a context
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        self.db.cleanup().await
    }
}
