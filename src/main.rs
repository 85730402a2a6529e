use dotenvy::dotenv;
use oficina::{config, errors::Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::app::load()?;
    info!("Loaded configuration for '{}'", app_config.workshop_name);

    // 4. Initialize the database
    let db = config::database::connect(&app_config.database_url).await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully");

    Ok(())
}
