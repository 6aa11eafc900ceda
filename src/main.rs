use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use shelterwalk_api::config::ApiConfig;
use shelterwalk_core::{clock::SystemClock, services::Scheduler};
use shelterwalk_db::{create_pool, schema::initialize_database, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env().wrap_err("Failed to load API configuration")?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool)
        .await
        .wrap_err("Failed to initialize database schema")?;

    // Wire the engine to PostgreSQL and the wall clock
    let scheduler = Scheduler::new(Arc::new(PgStore::new(db_pool)), Arc::new(SystemClock));

    // Start API server
    shelterwalk_api::start_server(config, scheduler).await?;

    Ok(())
}
