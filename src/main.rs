//! Threadline
//!
//! Main application entry point

use tracing::info;

use threadline::{
    config::Settings,
    database::{connection, DatabaseService},
    handlers,
    services::ServiceFactory,
    state::AppContext,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting Threadline operations service...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let db_pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone(), &database_service)?;

    let health = services.health_check().await;
    for issue in health.get_issues() {
        tracing::warn!(issue = %issue, "Service degraded at startup");
    }

    let state = AppContext::new(settings.clone(), database_service, services);

    let app = handlers::app(state);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "Threadline is ready");
    axum::serve(listener, app).await?;

    info!("Threadline has been shut down.");
    Ok(())
}
