use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api::{AppState, config::ApiConfig, routes, storage::ImageStore};
use common::{
    Database,
    database::{DatabaseConfig, health_check, init_pool},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting API service");

    let config = ApiConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let database = Database::new(pool);

    let image_store = ImageStore::new(&config.upload_dir);
    image_store.ensure_dir().await?;

    let app_state = AppState::new(database.clone(), image_store);

    // Start the web server
    let app = routes::create_router(app_state, config.max_upload_bytes);

    let listener = TcpListener::bind(config.address()).await?;
    info!("API service listening on {}", config.address());
    info!("API documentation available at {}", routes::API_UI_ROUTE);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    info!("API service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
