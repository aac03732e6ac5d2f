//! Maintenance entry point: prepares the database schema and seeds the badge
//! and goal template catalogs from config.toml. Safe to rerun at every deploy.

use dotenvy::dotenv;
use quit_buddy::{config, errors::Result};
use std::env;
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

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the catalog configuration
    let catalog_path = env::var("CATALOG_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let catalog = config::catalog::load_catalog(&catalog_path)?;
    info!(
        badges = catalog.badges.len(),
        goal_templates = catalog.goal_templates.len(),
        "Loaded catalog configuration."
    );

    // 4. Initialize database schema
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed the badge and goal template catalogs
    config::catalog::seed_catalogs(&db, &catalog).await?;
    info!("Catalogs seeded successfully.");

    Ok(())
}
