//! Create the database and apply the schema, then exit.
//!
//! Safe to run repeatedly: tables are only created when absent.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookclub_server::{config::AppConfig, repository::Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "bookclub_server={},init_db={}",
            config.logging.level, config.logging.level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let repository = Repository::connect(&config.database).await?;
    repository.migrate().await?;
    repository.close().await;

    tracing::info!(url = %config.database.url, "Initialized database");
    Ok(())
}
