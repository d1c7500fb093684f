use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api::{
    AppState,
    config::{AppConfig, StorageBackend},
    jwt::{JwtConfig, JwtService},
    routes,
};
use common::database::{self, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting DevConnector API service");

    let config = AppConfig::from_env()?;
    let jwt_service = JwtService::new(&JwtConfig::from(&config));

    let app_state = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = database::init_pool(&db_config).await?;

            if database::health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            database::apply_schema(&pool).await?;
            AppState::postgres(pool, jwt_service)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is lost on shutdown");
            AppState::in_memory(jwt_service)
        }
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
